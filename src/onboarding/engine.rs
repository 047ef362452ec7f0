//! ConversationEngine — owns one session's state, context and transcript,
//! and routes choice and text events through the transition function.

use std::time::Duration;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::ChatConfig;
use crate::error::ConversationError;

use super::model::{Message, SessionContext};
use super::options::{ChoiceOption, OptionProvider, ScriptedOptions};
use super::outbox::{Emission, Outbox};
use super::prompts;
use super::scoring::{QuizScorer, RandomScorer};
use super::state::ConversationState;
use super::transition::{
    Effect, Event, Pace, TransitionResult, TransitionRules, accepts_choice, transition,
};

/// What a submission did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Blank input; nothing happened.
    Ignored,
    /// Input was recorded but the state did not change.
    Stayed(ConversationState),
    /// The state advanced.
    Advanced {
        from: ConversationState,
        to: ConversationState,
    },
}

/// A single onboarding session.
///
/// Owned by the caller; one event is fully processed (context, transcript,
/// state) before the next is accepted. Output is posted to the outbox only
/// after the engine has been updated.
pub struct ConversationEngine {
    id: Uuid,
    config: ChatConfig,
    state: ConversationState,
    context: SessionContext,
    transcript: Vec<Message>,
    options: Box<dyn OptionProvider>,
    scorer: Box<dyn QuizScorer>,
    outbox: Outbox,
}

impl ConversationEngine {
    /// Start a session. The welcome message is posted right away.
    pub fn new(config: ChatConfig, outbox: Outbox) -> Self {
        let scorer: Box<dyn QuizScorer> = match config.score_seed {
            Some(seed) => Box::new(RandomScorer::seeded(seed)),
            None => Box::new(RandomScorer::from_entropy()),
        };

        let mut engine = Self {
            id: Uuid::new_v4(),
            config,
            state: ConversationState::default(),
            context: SessionContext::new(),
            transcript: Vec::new(),
            options: Box::new(ScriptedOptions),
            scorer,
            outbox,
        };

        let welcome = Message::bot(prompts::WELCOME);
        engine.transcript.push(welcome.clone());
        engine
            .outbox
            .post(Emission::Message(welcome), Duration::ZERO);

        info!(session = %engine.id, state = %engine.state, "Conversation started");
        engine
    }

    /// Replace the option provider.
    pub fn with_options(mut self, options: Box<dyn OptionProvider>) -> Self {
        self.options = options;
        self
    }

    /// Replace the quiz scorer.
    pub fn with_scorer(mut self, scorer: Box<dyn QuizScorer>) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> ConversationState {
        self.state
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    /// Read-only view of every line so far, in display order.
    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    /// Options valid in the current state.
    pub fn options(&self) -> Vec<ChoiceOption> {
        self.options.options(self.state, &self.context)
    }

    pub fn outbox(&self) -> &Outbox {
        &self.outbox
    }

    /// Handle a click on a predefined option.
    pub fn submit_choice(&mut self, choice_id: &str) -> Result<Outcome, ConversationError> {
        let option = self
            .options
            .resolve(self.state, &self.context, choice_id)
            // A custom provider may offer something the flow can't take.
            .filter(|o| accepts_choice(self.state, &self.context, &o.choice));

        let Some(option) = option else {
            warn!(session = %self.id, state = %self.state, choice = choice_id, "Rejected choice");
            return Err(ConversationError::InvalidChoice {
                choice: choice_id.to_string(),
                state: self.state,
            });
        };

        Ok(self.dispatch(Event::Choice(option)))
    }

    /// Handle free-form text. Blank input is ignored.
    pub fn submit_text(&mut self, text: &str) -> Outcome {
        if text.trim().is_empty() {
            debug!(session = %self.id, state = %self.state, "Ignored blank input");
            return Outcome::Ignored;
        }

        self.dispatch(Event::Text(text.to_string()))
    }

    /// Wait for all posted output to reach the sinks.
    pub async fn flush(&self) {
        self.outbox.flush().await;
    }

    /// End the session. Undelivered output is discarded; the transcript is
    /// returned to the caller.
    pub fn end(mut self) -> Vec<Message> {
        self.outbox.cancel();
        info!(
            session = %self.id,
            state = %self.state,
            messages = self.transcript.len(),
            "Conversation ended"
        );
        std::mem::take(&mut self.transcript)
    }

    fn dispatch(&mut self, event: Event) -> Outcome {
        let rules = self.rules();
        let result = transition(
            self.state,
            &self.context,
            event,
            rules,
            self.scorer.as_mut(),
        );
        self.apply(result)
    }

    fn rules(&self) -> TransitionRules {
        TransitionRules {
            reprompt_when_not_ready: self.config.reprompt_when_not_ready,
            announce_unsupported: self.config.announce_unsupported,
        }
    }

    fn delay(&self, pace: Pace) -> Duration {
        match pace {
            Pace::Instant => Duration::ZERO,
            Pace::Typing => self.config.typing_delay,
            Pace::LongTyping => self.config.long_typing_delay,
        }
    }

    /// Apply a transition: mutate context, transcript and state first, then
    /// post the emissions.
    fn apply(&mut self, result: TransitionResult) -> Outcome {
        let from = self.state;
        let mut emissions = Vec::new();

        for effect in result.effects {
            match effect {
                Effect::SetRole(role) => {
                    if !self.context.set_role(role) {
                        warn!(session = %self.id, %role, "Role already set, ignoring");
                    }
                }
                Effect::SetTraining(track) => {
                    if !self.context.set_training(track) {
                        warn!(session = %self.id, %track, "Training already set, ignoring");
                    }
                }
                Effect::RecordAnswer(answer) => {
                    if !self.context.record_answer(answer) {
                        warn!(session = %self.id, "Quiz already full, answer dropped");
                    }
                }
                Effect::RecordScore(score) => {
                    if self.context.record_score(score) {
                        info!(session = %self.id, score, "Quiz scored");
                    }
                }
                Effect::Say { origin, text, pace } => {
                    let message = Message::new(origin, text);
                    self.transcript.push(message.clone());
                    emissions.push((Emission::Message(message), self.delay(pace)));
                }
                Effect::Notify { notification, pace } => {
                    info!(session = %self.id, title = %notification.title, "Notification");
                    emissions.push((Emission::Notification(notification), self.delay(pace)));
                }
            }
        }

        self.state = result.new_state;

        for (emission, delay) in emissions {
            self.outbox.post(emission, delay);
        }

        if from == self.state {
            debug!(session = %self.id, state = %self.state, "Conversation held");
            Outcome::Stayed(self.state)
        } else {
            info!(session = %self.id, from = %from, to = %self.state, "Conversation advanced");
            Outcome::Advanced {
                from,
                to: self.state,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::onboarding::model::{Choice, Origin, ResultsOption, TrainingTrack, UserRole};
    use crate::onboarding::scoring::FixedScorer;
    use crate::onboarding::sink::MemorySink;

    fn engine() -> (ConversationEngine, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let outbox = Outbox::immediate(sink.clone(), sink.clone());
        let engine = ConversationEngine::new(ChatConfig::instant(), outbox)
            .with_scorer(Box::new(FixedScorer(82)));
        (engine, sink)
    }

    /// Replay `steps` (choice ids, or `text:` lines) on a fresh session.
    fn replay(steps: &[&str]) -> ConversationEngine {
        let (mut engine, _sink) = engine();
        for step in steps {
            match step.strip_prefix("text:") {
                Some(text) => {
                    engine.submit_text(text);
                }
                None => {
                    engine.submit_choice(step).unwrap();
                }
            }
        }
        engine
    }

    #[test]
    fn new_session_starts_with_welcome() {
        let (engine, sink) = engine();
        assert_eq!(engine.state(), ConversationState::RoleSelection);
        assert_eq!(engine.transcript().len(), 1);
        assert_eq!(engine.transcript()[0].text, prompts::WELCOME);
        assert_eq!(sink.messages().len(), 1);
        assert!(engine.context().role().is_none());
    }

    #[test]
    fn choice_updates_context_and_transcript() {
        let (mut engine, sink) = engine();
        let outcome = engine.submit_choice("Student").unwrap();
        assert_eq!(
            outcome,
            Outcome::Advanced {
                from: ConversationState::RoleSelection,
                to: ConversationState::TrainingSelection,
            }
        );
        assert_eq!(engine.context().role(), Some(UserRole::Student));

        let lines = &engine.transcript()[1..];
        assert_eq!(lines[0].origin, Origin::User);
        assert_eq!(lines[0].text, "I am a student.");
        assert_eq!(lines[1].origin, Origin::Bot);
        assert_eq!(sink.messages(), engine.transcript());
    }

    #[test]
    fn invalid_choice_changes_nothing() {
        let (mut engine, _sink) = engine();
        let err = engine.submit_choice("astronaut").unwrap_err();
        assert!(err.to_string().contains("astronaut"));
        assert_eq!(engine.state(), ConversationState::RoleSelection);
        assert_eq!(engine.transcript().len(), 1);

        // Still usable afterwards.
        assert!(engine.submit_choice("guide").is_ok());
    }

    #[test]
    fn second_training_pick_is_rejected() {
        let (mut engine, _sink) = engine();
        engine.submit_choice("vendor").unwrap();
        engine.submit_choice("marketplace").unwrap();
        assert_eq!(engine.state(), ConversationState::TrainingSelection);

        let before = engine.transcript().len();
        assert!(engine.submit_choice("stem").is_err());
        assert_eq!(engine.context().training(), Some(TrainingTrack::Marketplace));
        assert_eq!(engine.transcript().len(), before);
    }

    #[test]
    fn offered_options_are_always_accepted() {
        let student = [
            "student",
            "stem",
            "text:logic / algebra",
            "yes",
            "text:32",
            "text:4",
            "text:Industry",
        ];
        let vendor = ["vendor", "marketplace"];

        for path in [&student[..], &vendor[..]] {
            for len in 0..=path.len() {
                let prefix = &path[..len];
                for option in replay(prefix).options() {
                    let mut session = replay(prefix);
                    assert!(
                        session.submit_choice(&option.id).is_ok(),
                        "after {prefix:?}: offered '{}' was rejected",
                        option.id
                    );
                }
            }
        }
    }

    #[test]
    fn non_student_sees_no_menu_after_picking_a_track() {
        let (mut engine, _sink) = engine();
        engine.submit_choice("vendor").unwrap();
        assert_eq!(engine.options().len(), 5);

        engine.submit_choice("marketplace").unwrap();
        assert_eq!(engine.state(), ConversationState::TrainingSelection);
        assert!(engine.options().is_empty());
    }

    /// Offers a single shortcut track, plus a results option that makes no
    /// sense during track selection.
    struct ShortcutOptions;

    impl OptionProvider for ShortcutOptions {
        fn options(&self, state: ConversationState, _ctx: &SessionContext) -> Vec<ChoiceOption> {
            match state {
                ConversationState::RoleSelection => vec![ChoiceOption::new(
                    "learn",
                    "I want to learn",
                    Choice::Role(UserRole::Student),
                )],
                ConversationState::TrainingSelection => vec![
                    ChoiceOption::new("go", "Just go", Choice::Training(TrainingTrack::Stem)),
                    ChoiceOption::new("skip", "Skip ahead", Choice::Results(ResultsOption::A)),
                ],
                _ => Vec::new(),
            }
        }
    }

    #[test]
    fn custom_option_provider_drives_the_menus() {
        let (engine, _sink) = engine();
        let mut engine = engine.with_options(Box::new(ShortcutOptions));

        assert!(engine.submit_choice("student").is_err());
        engine.submit_choice("LEARN").unwrap();
        assert_eq!(engine.context().role(), Some(UserRole::Student));
        assert_eq!(engine.options().len(), 2);

        // Offered, but not something track selection can take.
        let err = engine.submit_choice("skip").unwrap_err();
        assert_eq!(
            err,
            ConversationError::InvalidChoice {
                choice: "skip".to_string(),
                state: ConversationState::TrainingSelection,
            }
        );

        engine.submit_choice("go").unwrap();
        assert_eq!(engine.state(), ConversationState::StrengthsChallenges);
        assert_eq!(engine.context().training(), Some(TrainingTrack::Stem));
    }

    #[test]
    fn blank_text_is_ignored() {
        let (mut engine, sink) = engine();
        assert_eq!(engine.submit_text("   \n\t"), Outcome::Ignored);
        assert_eq!(engine.transcript().len(), 1);
        assert_eq!(sink.messages().len(), 1);
    }

    #[test]
    fn full_student_flow_fires_two_notifications() {
        let (mut engine, sink) = engine();
        engine.submit_choice("student").unwrap();
        engine.submit_choice("stem").unwrap();
        engine.submit_text("Strength — logic; Challenge — algebra");
        engine.submit_choice("yes").unwrap();
        engine.submit_text("32");
        engine.submit_text("4 days");
        engine.submit_text("Industry, Innovation & Infrastructure");
        assert_eq!(engine.state(), ConversationState::QuizResults);
        assert_eq!(engine.context().quiz_score(), Some(82));

        engine.submit_choice("A").unwrap();
        engine.submit_text("mini-robot build");
        assert_eq!(engine.state(), ConversationState::TeamMatch);

        let titles: Vec<String> = sink.notifications().into_iter().map(|n| n.title).collect();
        assert_eq!(titles, vec!["Quiz Complete! 🎉", "Team Matched! 🤝"]);
    }

    #[test]
    fn end_returns_transcript() {
        let (mut engine, _sink) = engine();
        engine.submit_choice("innovator").unwrap();
        let transcript = engine.end();
        assert_eq!(transcript.len(), 3);
    }

    #[tokio::test]
    async fn deferred_session_delivers_after_flush() {
        let sink = Arc::new(MemorySink::new());
        let config = ChatConfig {
            typing_delay: Duration::from_millis(10),
            long_typing_delay: Duration::from_millis(15),
            ..ChatConfig::default()
        };
        let outbox = Outbox::deferred(sink.clone(), sink.clone());
        let mut engine = ConversationEngine::new(config, outbox);

        engine.submit_choice("student").unwrap();
        // State is updated before anything is delivered.
        assert_eq!(engine.state(), ConversationState::TrainingSelection);
        assert_eq!(engine.transcript().len(), 3);

        tokio::time::timeout(Duration::from_secs(5), engine.flush())
            .await
            .expect("flush timed out");
        assert_eq!(sink.messages(), engine.transcript());
    }

    #[tokio::test]
    async fn ending_session_discards_delayed_reply() {
        let sink = Arc::new(MemorySink::new());
        let config = ChatConfig {
            typing_delay: Duration::from_secs(30),
            ..ChatConfig::default()
        };
        let outbox = Outbox::deferred(sink.clone(), sink.clone());
        let mut engine = ConversationEngine::new(config, outbox);
        engine.submit_choice("guide").unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;

        let transcript = engine.end();
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert_eq!(transcript.len(), 3);
        // Welcome and the echo went out instantly; the bot reply never did.
        assert_eq!(sink.messages().len(), 2);
    }
}
