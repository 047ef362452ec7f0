//! Session data models: roles, tracks, choices, messages, and the
//! accumulated session context.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of questions in the baseline quiz.
pub const QUIZ_LENGTH: usize = 3;

/// The part a user plays in the hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Student,
    Collaborator,
    Innovator,
    Trainee,
    Vendor,
    Guide,
}

impl UserRole {
    pub const ALL: [UserRole; 6] = [
        Self::Student,
        Self::Collaborator,
        Self::Innovator,
        Self::Trainee,
        Self::Vendor,
        Self::Guide,
    ];

    /// Stable identifier, also used as the choice id.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Collaborator => "collaborator",
            Self::Innovator => "innovator",
            Self::Trainee => "trainee",
            Self::Vendor => "vendor",
            Self::Guide => "guide",
        }
    }

    /// Button label shown on the role menu.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Student => "Student 🎓",
            Self::Collaborator => "Paired Collaborator 🤝",
            Self::Innovator => "Innovator/Coder 💡",
            Self::Trainee => "Computer Trainee 💻",
            Self::Vendor => "Vendor 🛒",
            Self::Guide => "Guide 🌟",
        }
    }

    /// Whether this role follows the guided learning track.
    pub fn is_learner(&self) -> bool {
        matches!(self, Self::Student)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown role: {}", s))
    }
}

/// A training track from the fixed catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainingTrack {
    Stem,
    Computer,
    SmartTech,
    Algorithms,
    Marketplace,
}

impl TrainingTrack {
    pub const ALL: [TrainingTrack; 5] = [
        Self::Stem,
        Self::Computer,
        Self::SmartTech,
        Self::Algorithms,
        Self::Marketplace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stem => "stem",
            Self::Computer => "computer",
            Self::SmartTech => "smarttech",
            Self::Algorithms => "algorithms",
            Self::Marketplace => "marketplace",
        }
    }

    /// Human-readable track name, used for the echoed choice and the
    /// strengths prompt.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Stem => "STEM foundations",
            Self::Computer => "Computer Training",
            Self::SmartTech => "Smart Tech",
            Self::Algorithms => "Algorithms",
            Self::Marketplace => "Marketplace & entrepreneurship",
        }
    }
}

impl std::fmt::Display for TrainingTrack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TrainingTrack {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown training track: {}", s))
    }
}

/// Answer buttons offered at the quiz-ready prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Readiness {
    Ready,
    NotYet,
}

/// The menu offered once the quiz is scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResultsOption {
    /// Join the mid-level project.
    A,
    /// Practice with micro-lessons.
    B,
    /// Request a mentor check.
    C,
}

impl ResultsOption {
    pub const ALL: [ResultsOption; 3] = [Self::A, Self::B, Self::C];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::A => "A) Join Mid-level Project 🎯",
            Self::B => "B) Practice Lessons 📚",
            Self::C => "C) Mentor Check 👋",
        }
    }
}

/// A typed choice, resolved from an opaque choice id by the option provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Choice {
    Role(UserRole),
    Training(TrainingTrack),
    Readiness(Readiness),
    Results(ResultsOption),
}

/// Who produced a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Bot,
    User,
}

/// One immutable line of the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub text: String,
    pub origin: Origin,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(origin: Origin, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            origin,
            timestamp: Utc::now(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Origin::Bot, text)
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Origin::User, text)
    }

    pub fn is_bot(&self) -> bool {
        self.origin == Origin::Bot
    }
}

/// A transient toast-style alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

impl Notification {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Data accumulated over one session.
///
/// Role and training are write-once; answers are append-only and capped at
/// [`QUIZ_LENGTH`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionContext {
    role: Option<UserRole>,
    training: Option<TrainingTrack>,
    quiz_answers: Vec<String>,
    quiz_score: Option<u8>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn role(&self) -> Option<UserRole> {
        self.role
    }

    pub fn training(&self) -> Option<TrainingTrack> {
        self.training
    }

    pub fn quiz_answers(&self) -> &[String] {
        &self.quiz_answers
    }

    pub fn quiz_score(&self) -> Option<u8> {
        self.quiz_score
    }

    /// Set the role. Returns false (and changes nothing) if already set.
    pub(crate) fn set_role(&mut self, role: UserRole) -> bool {
        if self.role.is_some() {
            return false;
        }
        self.role = Some(role);
        true
    }

    /// Set the training track. Returns false if already set.
    pub(crate) fn set_training(&mut self, track: TrainingTrack) -> bool {
        if self.training.is_some() {
            return false;
        }
        self.training = Some(track);
        true
    }

    /// Append a quiz answer. Returns false once the quiz is full.
    pub(crate) fn record_answer(&mut self, answer: String) -> bool {
        if self.quiz_answers.len() >= QUIZ_LENGTH {
            return false;
        }
        self.quiz_answers.push(answer);
        true
    }

    /// Store the quiz score. Returns false if a score already exists.
    pub(crate) fn record_score(&mut self, score: u8) -> bool {
        if self.quiz_score.is_some() {
            return false;
        }
        self.quiz_score = Some(score);
        true
    }

    /// Render the context as a short markdown summary.
    pub fn summary(&self) -> String {
        let mut parts = vec!["# Session".to_string()];

        match self.role {
            Some(role) => parts.push(format!("- **Role:** {}", role)),
            None => parts.push("- **Role:** (not chosen)".to_string()),
        }

        if let Some(track) = self.training {
            parts.push(format!("- **Training:** {}", track.display_name()));
        }

        if !self.quiz_answers.is_empty() {
            parts.push(format!(
                "- **Quiz answers:** {}/{}",
                self.quiz_answers.len(),
                QUIZ_LENGTH
            ));
        }

        if let Some(score) = self.quiz_score {
            parts.push(format!("- **Quiz score:** {}/100", score));
        }

        parts.join("\n")
    }
}
