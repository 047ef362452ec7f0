//! Choice sets offered to the user in each state.

use serde::Serialize;

use super::model::{Choice, Readiness, ResultsOption, SessionContext, TrainingTrack, UserRole};
use super::state::ConversationState;
use super::transition::accepts_choice;

/// One selectable option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceOption {
    /// Opaque id submitted back through `submit_choice`.
    pub id: String,
    /// Button text.
    pub label: String,
    /// What picking this option means.
    pub choice: Choice,
}

impl ChoiceOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>, choice: Choice) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            choice,
        }
    }

    /// Whether a submitted id refers to this option.
    pub fn matches(&self, id: &str) -> bool {
        self.id.eq_ignore_ascii_case(id.trim())
    }
}

/// Supplies the valid choice set for a state.
pub trait OptionProvider: Send + Sync {
    fn options(&self, state: ConversationState, ctx: &SessionContext) -> Vec<ChoiceOption>;

    /// Resolve a submitted id against the options currently on offer.
    fn resolve(
        &self,
        state: ConversationState,
        ctx: &SessionContext,
        id: &str,
    ) -> Option<ChoiceOption> {
        self.options(state, ctx).into_iter().find(|o| o.matches(id))
    }
}

/// The stock menus: roles, the training catalog, readiness and results.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptedOptions;

impl ScriptedOptions {
    fn menu(state: ConversationState) -> Vec<ChoiceOption> {
        match state {
            ConversationState::RoleSelection => UserRole::ALL
                .into_iter()
                .map(|r| ChoiceOption::new(r.as_str(), r.label(), Choice::Role(r)))
                .collect(),
            ConversationState::TrainingSelection => TrainingTrack::ALL
                .into_iter()
                .map(|t| ChoiceOption::new(t.as_str(), t.display_name(), Choice::Training(t)))
                .collect(),
            ConversationState::QuizReady => vec![
                ChoiceOption::new(
                    "yes",
                    "Yes, I'm Ready! 🚀",
                    Choice::Readiness(Readiness::Ready),
                ),
                ChoiceOption::new("not-yet", "Not Yet", Choice::Readiness(Readiness::NotYet)),
            ],
            ConversationState::QuizResults => ResultsOption::ALL
                .into_iter()
                .map(|o| ChoiceOption::new(o.as_str(), o.label(), Choice::Results(o)))
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl OptionProvider for ScriptedOptions {
    fn options(&self, state: ConversationState, ctx: &SessionContext) -> Vec<ChoiceOption> {
        Self::menu(state)
            .into_iter()
            .filter(|o| accepts_choice(state, ctx, &o.choice))
            .collect()
    }
}
