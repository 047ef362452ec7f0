//! Scripted bot text for the onboarding flow.
//!
//! Everything the bot says lives here as lookup tables keyed by enum, so a
//! new role or track only adds a match arm.

use super::model::{Notification, ResultsOption, TrainingTrack, UserRole};

/// Opening message, present in the transcript from session start.
pub const WELCOME: &str = "\
👋 Hello — welcome to **FATAP-CT: STEM, Smart Tech & Innovation Hub**.
FATAPCT helps learners go from basics → hands-on skills → hackathons → marketplace.

**Choose your role in Fatap:**

• **Student** – Someone who wants to learn STEM or smart technologies
• **Paired Collaborator** – Someone joining a project group or team
• **Innovator/Coder** – Someone who wants to take part in hackathons, coding challenges, or competitions
• **Computer Trainee** – Someone focusing on computer training (hardware, networking, or programming)
• **Vendor** – Someone who lists and sells products in the marketplace
• **Guide** – Someone who supports, reviews, and gives feedback on projects";

/// Sent after the strengths/challenges answer.
pub const QUIZ_INTRO: &str = "\
Thank you — I'll use that to match you with peers and recommend micro-lessons.
First, let's run a short baseline quiz (3 questions) to check your current level. Ready?";

/// Re-prompt for a user who isn't ready yet (only when enabled in config).
pub const READINESS_REPROMPT: &str =
    "No rush! Just say \"yes\" whenever you're ready to start the 3-question quiz.";

/// Sent after option A on the results menu.
pub const PROJECT_PROMPT: &str = "\
Nice — I'm registering you for a mid-level project cohort.
Next: tell me what kind of project you'd prefer (options: data puzzle, mini-robot build, mobile repair challenge, math modelling).
I'll also auto-match you with 2 peers who complement your strengths.";

/// Fixed team assignment.
pub const TEAM_MATCH: &str = "\
✅ Match complete. Your team: Alex (design skills), Jordan (coding expertise).
Your team has 7 days to submit a mini-project. Use the chat to request micro-lessons, test questions, or schedule a workshop.

🎉 Ready to start building something amazing!";

/// The quiz, one question per state.
pub const QUIZ_Q1: &str =
    "Mini Quiz — Question 1:\nWhat is the next number in the sequence: 2, 4, 8, 16, ?";

pub const QUIZ_Q2: &str = "Question 2:\nIf you have 3 projects and each takes 2 days to complete, and you can work on 2 projects simultaneously, how many days total?";

pub const QUIZ_Q3: &str = "Question 3:\nWhat does SDG 9 focus on? (Industry, Innovation & Infrastructure / Education / Health)";

/// The echoed user line for a role choice.
pub fn role_echo(role: UserRole) -> String {
    format!("I am a {role}.")
}

/// Role-specific welcome line sent after role selection.
pub fn role_response(role: UserRole) -> &'static str {
    match role {
        UserRole::Student => {
            "Great! Let's get started. What best describes your main interest today?"
        }
        UserRole::Collaborator => {
            "Welcome to the Collaboration Hub! You'll be matched with project teams based on your skills and interests."
        }
        UserRole::Innovator => {
            "Excellent choice! Welcome to our Hackathon & Coding Challenges section. Ready to innovate and compete?"
        }
        UserRole::Trainee => {
            "Perfect! Welcome to our Computer Training Workshops. Let's build your technical skills step by step."
        }
        UserRole::Vendor => {
            "Welcome to the Marketplace! Here you can list and sell your products to our community."
        }
        UserRole::Guide => {
            "Thank you for being a Guide! Welcome to the Mentoring & Review Dashboard where you can support other learners."
        }
    }
}

/// Strengths/challenges prompt for a student who picked `track`.
pub fn strengths_prompt(track: TrainingTrack) -> String {
    format!(
        "Awesome — {} it is! Before we begin, tell me one strength and one challenge you face in this area.\n\
         (Example: Strength — logic; Challenge — algebra)",
        track.display_name()
    )
}

/// Score report plus the follow-up menu.
pub fn results_message(score: u8) -> String {
    format!(
        "✅ Great — your answers are submitted.\n\
         **Current mini-quiz score:** {score}/100.\n\n\
         Since your score is >= 70, you automatically qualify for a mid-level group project!\n\n\
         Which would you like to do now?\n\
         A) Join the mid-level project\n\
         B) Practice with micro-lessons\n\
         C) Request a mentor check"
    )
}

/// Notice for results options that have no scripted branch yet.
pub fn unsupported_option_notice(option: Option<ResultsOption>) -> String {
    let what = match option {
        Some(ResultsOption::B) => "Practice lessons aren't",
        Some(ResultsOption::C) => "Mentor checks aren't",
        Some(ResultsOption::A) | None => "That option isn't",
    };
    format!("{what} available yet. Reply A to join the mid-level project.")
}

pub fn quiz_complete_notification(score: u8) -> Notification {
    Notification::new(
        "Quiz Complete! 🎉",
        format!("You scored {score}/100 - Excellent work!"),
    )
}

pub fn team_matched_notification() -> Notification {
    Notification::new(
        "Team Matched! 🤝",
        "You're now part of an innovative project team!",
    )
}
