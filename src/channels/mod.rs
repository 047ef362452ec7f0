//! Front-end channels that drive a conversation session.

pub mod cli;

pub use cli::{CliChannel, Command, TerminalSink};
