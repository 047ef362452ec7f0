//! Pure transition function for the onboarding conversation.
//!
//! Given the current state, the session context and an event, produce the
//! next state and the effects to apply. No I/O happens here; the engine
//! applies the effects and hands emissions to the outbox.
//!
//! Choices are checked with [`accepts_choice`] before they get here, so a
//! transition itself never fails.

use super::model::{
    Choice, Notification, Origin, Readiness, ResultsOption, SessionContext, TrainingTrack,
    UserRole,
};
use super::options::ChoiceOption;
use super::prompts;
use super::scoring::QuizScorer;
use super::state::ConversationState;

/// An input event.
#[derive(Debug, Clone)]
pub enum Event {
    /// The user picked a resolved option.
    Choice(ChoiceOption),
    /// The user submitted non-empty free text.
    Text(String),
}

/// How long an emission waits before it is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pace {
    /// Shown right away (user echoes).
    Instant,
    /// Ordinary bot reply.
    Typing,
    /// Heavier replies: quiz results, team match.
    LongTyping,
}

/// Effects to be applied after a transition, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SetRole(UserRole),
    SetTraining(TrainingTrack),
    RecordAnswer(String),
    RecordScore(u8),
    /// Append a transcript line.
    Say {
        origin: Origin,
        text: String,
        pace: Pace,
    },
    /// Fire a notification.
    Notify {
        notification: Notification,
        pace: Pace,
    },
}

impl Effect {
    fn user(text: impl Into<String>) -> Self {
        Effect::Say {
            origin: Origin::User,
            text: text.into(),
            pace: Pace::Instant,
        }
    }

    fn bot(text: impl Into<String>) -> Self {
        Effect::Say {
            origin: Origin::Bot,
            text: text.into(),
            pace: Pace::Typing,
        }
    }

    fn bot_slow(text: impl Into<String>) -> Self {
        Effect::Say {
            origin: Origin::Bot,
            text: text.into(),
            pace: Pace::LongTyping,
        }
    }
}

/// Result of a state transition.
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ConversationState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ConversationState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }
}

/// Behaviour switches for the two places the scripted flow has no reply.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransitionRules {
    pub reprompt_when_not_ready: bool,
    pub announce_unsupported: bool,
}

/// Whether `choice` can be taken in `state` given what is already known.
///
/// Role and training are set once; after that their menus are closed.
pub fn accepts_choice(state: ConversationState, ctx: &SessionContext, choice: &Choice) -> bool {
    use ConversationState::*;

    match (state, choice) {
        (RoleSelection, Choice::Role(_)) => ctx.role().is_none(),
        (TrainingSelection, Choice::Training(_)) => ctx.training().is_none(),
        (QuizReady, Choice::Readiness(_)) | (QuizResults, Choice::Results(_)) => true,
        _ => false,
    }
}

/// Compute the transition for `event` in `state`.
pub fn transition(
    state: ConversationState,
    ctx: &SessionContext,
    event: Event,
    rules: TransitionRules,
    scorer: &mut dyn QuizScorer,
) -> TransitionResult {
    match event {
        Event::Choice(option) => choice_transition(state, ctx, option, rules),
        Event::Text(text) => text_transition(state, ctx, text, rules, scorer),
    }
}

fn choice_transition(
    state: ConversationState,
    ctx: &SessionContext,
    option: ChoiceOption,
    rules: TransitionRules,
) -> TransitionResult {
    use ConversationState::*;

    match (state, option.choice) {
        (RoleSelection, Choice::Role(role)) => TransitionResult::new(TrainingSelection)
            .with_effects([
                Effect::SetRole(role),
                Effect::user(prompts::role_echo(role)),
                Effect::bot(prompts::role_response(role)),
            ]),

        (TrainingSelection, Choice::Training(track)) => {
            let result = TransitionResult::new(TrainingSelection).with_effects([
                Effect::SetTraining(track),
                Effect::user(track.display_name()),
            ]);
            if ctx.role().is_some_and(|r| r.is_learner()) {
                let mut result = result.with_effect(Effect::bot(prompts::strengths_prompt(track)));
                result.new_state = StrengthsChallenges;
                result
            } else {
                result
            }
        }

        (QuizReady, Choice::Readiness(Readiness::Ready)) => {
            start_quiz().with_effects_front(Effect::user(option.label))
        }

        (QuizReady, Choice::Readiness(Readiness::NotYet)) => {
            not_ready(rules).with_effects_front(Effect::user(option.label))
        }

        (QuizResults, Choice::Results(ResultsOption::A)) => {
            join_project().with_effects_front(Effect::user(option.label))
        }

        (QuizResults, Choice::Results(other)) => {
            unsupported(Some(other), rules).with_effects_front(Effect::user(option.label))
        }

        // Filtered out by `accepts_choice`.
        _ => TransitionResult::new(state),
    }
}

fn text_transition(
    state: ConversationState,
    ctx: &SessionContext,
    text: String,
    rules: TransitionRules,
    scorer: &mut dyn QuizScorer,
) -> TransitionResult {
    use ConversationState::*;

    let lowered = text.to_lowercase();
    let echo = Effect::user(text.clone());

    let result = match state {
        StrengthsChallenges => {
            TransitionResult::new(QuizReady).with_effect(Effect::bot(prompts::QUIZ_INTRO))
        }

        QuizReady if lowered.contains("yes") => start_quiz(),
        QuizReady => not_ready(rules),

        QuizQ1 => TransitionResult::new(QuizQ2).with_effects([
            Effect::RecordAnswer(text),
            Effect::bot(prompts::QUIZ_Q2),
        ]),

        QuizQ2 => TransitionResult::new(QuizQ3).with_effects([
            Effect::RecordAnswer(text),
            Effect::bot(prompts::QUIZ_Q3),
        ]),

        QuizQ3 => {
            let mut answers = ctx.quiz_answers().to_vec();
            answers.push(text.clone());
            let score = scorer.score(&answers);
            TransitionResult::new(QuizResults).with_effects([
                Effect::RecordAnswer(text),
                Effect::RecordScore(score),
                Effect::bot_slow(prompts::results_message(score)),
                Effect::Notify {
                    notification: prompts::quiz_complete_notification(score),
                    pace: Pace::Instant,
                },
            ])
        }

        QuizResults if lowered.contains('a') => join_project(),
        QuizResults => unsupported(None, rules),

        ProjectSelection => TransitionResult::new(TeamMatch).with_effects([
            Effect::bot_slow(prompts::TEAM_MATCH),
            Effect::Notify {
                notification: prompts::team_matched_notification(),
                pace: Pace::Instant,
            },
        ]),

        // Choice-only states and the terminal state: echo, nothing else.
        Welcome | RoleSelection | TrainingSelection | TeamMatch => TransitionResult::new(state),
    };

    result.with_effects_front(echo)
}

fn start_quiz() -> TransitionResult {
    TransitionResult::new(ConversationState::QuizQ1)
        .with_effect(Effect::bot(prompts::QUIZ_Q1))
}

fn not_ready(rules: TransitionRules) -> TransitionResult {
    let result = TransitionResult::new(ConversationState::QuizReady);
    if rules.reprompt_when_not_ready {
        result.with_effect(Effect::bot(prompts::READINESS_REPROMPT))
    } else {
        result
    }
}

fn join_project() -> TransitionResult {
    TransitionResult::new(ConversationState::ProjectSelection)
        .with_effect(Effect::bot(prompts::PROJECT_PROMPT))
}

fn unsupported(option: Option<ResultsOption>, rules: TransitionRules) -> TransitionResult {
    let result = TransitionResult::new(ConversationState::QuizResults);
    if rules.announce_unsupported {
        result.with_effect(Effect::bot(prompts::unsupported_option_notice(option)))
    } else {
        result
    }
}

impl TransitionResult {
    /// Put `effect` ahead of everything already queued (user echo first).
    fn with_effects_front(mut self, effect: Effect) -> Self {
        self.effects.insert(0, effect);
        self
    }
}
