//! Onboarding system — the scripted FATAP-CT conversation.
//!
//! A new user is walked through role selection, a training track, a short
//! self-assessment quiz and team matching. The `ConversationEngine` owns the
//! session; the pure `transition` function decides what each event does; the
//! `Outbox` delivers the resulting lines and notifications to the sinks.

pub mod engine;
pub mod model;
pub mod options;
pub mod outbox;
pub mod prompts;
pub mod scoring;
pub mod sink;
pub mod state;
pub mod transition;

#[cfg(test)]
mod proptests;

pub use engine::{ConversationEngine, Outcome};
pub use model::{
    Choice, Message, Notification, Origin, Readiness, ResultsOption, SessionContext,
    TrainingTrack, UserRole,
};
pub use options::{ChoiceOption, OptionProvider, ScriptedOptions};
pub use outbox::{Emission, Outbox};
pub use scoring::{FixedScorer, QuizScorer, RandomScorer};
pub use sink::{MemorySink, MessageSink, NotificationSink};
pub use state::ConversationState;
