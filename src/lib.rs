//! FATAP chat — scripted onboarding conversation core.

pub mod channels;
pub mod config;
pub mod error;
pub mod onboarding;
