//! Conversation state machine — tracks which stage the user is in.

use serde::{Deserialize, Serialize};

/// The stages of the onboarding conversation.
///
/// Progresses linearly: RoleSelection → TrainingSelection →
/// StrengthsChallenges → QuizReady → QuizQ1 → QuizQ2 → QuizQ3 →
/// QuizResults → ProjectSelection → TeamMatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConversationState {
    Welcome,
    RoleSelection,
    TrainingSelection,
    StrengthsChallenges,
    QuizReady,
    QuizQ1,
    QuizQ2,
    QuizQ3,
    QuizResults,
    ProjectSelection,
    TeamMatch,
}

impl ConversationState {
    /// Every state, in flow order.
    pub const ALL: [ConversationState; 11] = [
        Self::Welcome,
        Self::RoleSelection,
        Self::TrainingSelection,
        Self::StrengthsChallenges,
        Self::QuizReady,
        Self::QuizQ1,
        Self::QuizQ2,
        Self::QuizQ3,
        Self::QuizResults,
        Self::ProjectSelection,
        Self::TeamMatch,
    ];

    /// Check if a transition from `self` to `target` is valid.
    ///
    /// Staying put is only allowed where the flow waits on an answer it
    /// doesn't recognize.
    pub fn can_transition_to(&self, target: ConversationState) -> bool {
        use ConversationState::*;
        matches!(
            (self, target),
            (Welcome, RoleSelection)
                | (RoleSelection, TrainingSelection)
                | (TrainingSelection, StrengthsChallenges)
                | (StrengthsChallenges, QuizReady)
                | (QuizReady, QuizQ1)
                | (QuizQ1, QuizQ2)
                | (QuizQ2, QuizQ3)
                | (QuizQ3, QuizResults)
                | (QuizResults, ProjectSelection)
                | (ProjectSelection, TeamMatch)
                | (TrainingSelection, TrainingSelection)
                | (QuizReady, QuizReady)
                | (QuizResults, QuizResults)
                | (TeamMatch, TeamMatch)
        )
    }

    /// Whether this state is terminal (the scripted flow is done).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::TeamMatch)
    }

    /// Whether this is one of the three quiz question states.
    pub fn is_quiz_question(&self) -> bool {
        matches!(self, Self::QuizQ1 | Self::QuizQ2 | Self::QuizQ3)
    }

    /// Whether the presentation layer should show a free-text input box.
    pub fn accepts_free_text(&self) -> bool {
        use ConversationState::*;
        matches!(
            self,
            StrengthsChallenges
                | QuizReady
                | QuizQ1
                | QuizQ2
                | QuizQ3
                | QuizResults
                | ProjectSelection
                | TeamMatch
        )
    }

    /// Position in the flow, starting at 0 for `Welcome`.
    pub fn ordinal(&self) -> usize {
        Self::ALL
            .iter()
            .position(|s| s == self)
            .unwrap_or_default()
    }
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::RoleSelection
    }
}

impl std::fmt::Display for ConversationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Welcome => "welcome",
            Self::RoleSelection => "role-selection",
            Self::TrainingSelection => "training-selection",
            Self::StrengthsChallenges => "strengths-challenges",
            Self::QuizReady => "quiz-ready",
            Self::QuizQ1 => "quiz-q1",
            Self::QuizQ2 => "quiz-q2",
            Self::QuizQ3 => "quiz-q3",
            Self::QuizResults => "quiz-results",
            Self::ProjectSelection => "project-selection",
            Self::TeamMatch => "team-match",
        };
        write!(f, "{s}")
    }
}
