//! CLI channel — stdin/stdout front-end for a single onboarding session.

use std::pin::Pin;

use futures::stream::{self, Stream, StreamExt};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::error::{ChannelError, Result};
use crate::onboarding::{
    ChoiceOption, ConversationEngine, Message, MessageSink, Notification, NotificationSink,
    Origin,
};

/// Stream of raw input lines. A read error ends the stream.
pub type LineStream = Pin<Box<dyn Stream<Item = std::io::Result<String>> + Send>>;

/// What a line of terminal input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Options,
    Status,
    Transcript,
    Choose(String),
    Say(String),
}

/// Interpret one input line against the options currently on offer.
///
/// A number picks the n-th option, an exact option id picks that option,
/// and anything else is free text.
pub fn parse_input(line: &str, options: &[ChoiceOption]) -> Command {
    let line = line.trim();
    match line {
        "/quit" | "/exit" => return Command::Quit,
        "/options" => return Command::Options,
        "/status" => return Command::Status,
        "/transcript" => return Command::Transcript,
        _ => {}
    }

    if let Ok(n) = line.parse::<usize>() {
        if let Some(option) = n.checked_sub(1).and_then(|i| options.get(i)) {
            return Command::Choose(option.id.clone());
        }
    }

    if let Some(option) = options.iter().find(|o| o.matches(line)) {
        return Command::Choose(option.id.clone());
    }

    Command::Say(line.to_string())
}

/// Numbered option menu, one per line.
pub fn render_options(options: &[ChoiceOption]) -> String {
    options
        .iter()
        .enumerate()
        .map(|(i, o)| format!("  [{}] {}  ({})", i + 1, o.label, o.id))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prints transcript lines and notifications to the terminal.
#[derive(Debug, Default)]
pub struct TerminalSink;

impl MessageSink for TerminalSink {
    fn append(&self, message: &Message) {
        match message.origin {
            Origin::Bot => println!("\n{}\n", message.text),
            Origin::User => println!("  you › {}", message.text),
        }
    }
}

impl NotificationSink for TerminalSink {
    fn notify(&self, notification: &Notification) {
        eprintln!("🔔 {} — {}", notification.title, notification.body);
    }
}

/// A simple CLI channel that reads from stdin and drives one session.
pub struct CliChannel;

impl CliChannel {
    pub fn new() -> Self {
        Self
    }

    /// Start reading stdin on a background task.
    pub fn start(&self) -> std::result::Result<LineStream, ChannelError> {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();

        tokio::spawn(async move {
            let stdin = tokio::io::stdin();
            let reader = BufReader::new(stdin);
            let mut lines = reader.lines();

            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        if tx.send(Ok(line)).is_err() {
                            break;
                        }
                    }
                    Ok(None) => break, // EOF
                    Err(e) => {
                        tracing::error!("Error reading stdin: {}", e);
                        let _ = tx.send(Err(e));
                        break;
                    }
                }
            }
        });

        let stream = stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|line| (line, rx))
        });

        Ok(Box::pin(stream))
    }

    /// Run the session until `/quit` or EOF.
    pub async fn run(&self, engine: &mut ConversationEngine) -> Result<()> {
        let mut lines = self.start()?;

        engine.flush().await;
        self.prompt(engine);

        while let Some(line) = lines.next().await {
            let line = line.map_err(ChannelError::from)?;
            if line.trim().is_empty() {
                eprint!("> ");
                continue;
            }

            match parse_input(&line, &engine.options()) {
                Command::Quit => break,
                Command::Options => {}
                Command::Status => {
                    println!("{}\n- **State:** {}", engine.context().summary(), engine.state());
                }
                Command::Transcript => match serde_json::to_string_pretty(engine.transcript()) {
                    Ok(json) => println!("{json}"),
                    Err(e) => tracing::warn!("Failed to serialize transcript: {}", e),
                },
                Command::Choose(id) => {
                    if let Err(e) = engine.submit_choice(&id) {
                        eprintln!("⚠️  {e}");
                    }
                }
                Command::Say(text) => {
                    engine.submit_text(&text);
                }
            }

            engine.flush().await;
            self.prompt(engine);
        }

        Ok(())
    }

    fn prompt(&self, engine: &ConversationEngine) {
        let state = engine.state();
        let options = engine.options();
        if !options.is_empty() {
            eprintln!("{}", render_options(&options));
        }
        if state.is_terminal() {
            eprintln!("   (onboarding complete — /transcript to review, /quit to exit)");
        } else if state.accepts_free_text() {
            eprintln!("   (type your answer)");
        }
        eprint!("> ");
    }
}

impl Default for CliChannel {
    fn default() -> Self {
        Self::new()
    }
}
