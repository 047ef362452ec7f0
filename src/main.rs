use std::sync::Arc;

use fatap_chat::channels::{CliChannel, TerminalSink};
use fatap_chat::config::ChatConfig;
use fatap_chat::onboarding::{ConversationEngine, Outbox};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (stderr, so it doesn't interleave with the chat)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = ChatConfig::from_env()?;

    eprintln!("✨ FATAPCT v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   STEM, Smart Tech & Innovation Hub - SDG 9");
    eprintln!(
        "   Typing delay: {}ms / {}ms",
        config.typing_delay.as_millis(),
        config.long_typing_delay.as_millis()
    );
    eprintln!("   Pick an option by number or id, or type a reply. /quit to exit.\n");

    let sink = Arc::new(TerminalSink);
    let outbox = if config.is_instant() {
        Outbox::immediate(sink.clone(), sink)
    } else {
        Outbox::deferred(sink.clone(), sink)
    };

    let mut engine = ConversationEngine::new(config, outbox);
    let channel = CliChannel::new();
    channel.run(&mut engine).await?;

    let transcript = engine.end();
    tracing::info!(messages = transcript.len(), "Session closed");

    Ok(())
}
