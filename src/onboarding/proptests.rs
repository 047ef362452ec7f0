//! Property-based tests for the conversation engine
//!
//! Random event sequences must never break the session invariants.

use std::sync::Arc;

use proptest::prelude::*;

use super::engine::ConversationEngine;
use super::model::{Message, QUIZ_LENGTH};
use super::outbox::Outbox;
use super::scoring::{MAX_SCORE, PASSING_SCORE, RandomScorer};
use super::sink::MemorySink;
use super::state::ConversationState;
use crate::config::ChatConfig;

#[derive(Debug, Clone)]
enum Op {
    Choose(String),
    Say(String),
}

fn arb_choice_id() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("student".to_string()),
        Just("guide".to_string()),
        Just("vendor".to_string()),
        Just("stem".to_string()),
        Just("algorithms".to_string()),
        Just("yes".to_string()),
        Just("not-yet".to_string()),
        Just("A".to_string()),
        Just("b".to_string()),
        Just("C".to_string()),
        "[a-z]{1,8}",
    ]
}

fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("   ".to_string()),
        Just("yes".to_string()),
        Just("A".to_string()),
        Just("not yet".to_string()),
        "[a-zA-Z0-9 ]{1,24}",
    ]
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        arb_choice_id().prop_map(Op::Choose),
        arb_text().prop_map(Op::Say),
    ]
}

fn new_engine(seed: u64) -> ConversationEngine {
    let sink = Arc::new(MemorySink::new());
    let outbox = Outbox::immediate(sink.clone(), sink);
    ConversationEngine::new(ChatConfig::instant(), outbox)
        .with_scorer(Box::new(RandomScorer::seeded(seed)))
}

proptest! {
    #[test]
    fn session_invariants_hold(ops in prop::collection::vec(arb_op(), 0..60), seed in any::<u64>()) {
        let mut engine = new_engine(seed);
        let mut quiz_submissions = 0usize;
        let mut previous: Vec<Message> = engine.transcript().to_vec();
        let mut role = None;
        let mut training = None;

        for op in ops {
            let before = engine.state();
            match op {
                Op::Choose(id) => {
                    let _ = engine.submit_choice(&id);
                }
                Op::Say(text) => {
                    engine.submit_text(&text);
                    if text.trim().is_empty() {
                        prop_assert_eq!(engine.state(), before);
                        prop_assert_eq!(engine.transcript().len(), previous.len());
                    } else if before.is_quiz_question() {
                        quiz_submissions += 1;
                    }
                }
            }

            // Transitions only follow the state machine.
            let after = engine.state();
            prop_assert!(after == before || before.can_transition_to(after), "{} -> {}", before, after);

            // Transcript only grows; earlier lines are untouched.
            let now = engine.transcript();
            prop_assert!(now.len() >= previous.len());
            prop_assert_eq!(&now[..previous.len()], previous.as_slice());
            previous = now.to_vec();

            // Role and training are write-once.
            if role.is_some() {
                prop_assert_eq!(engine.context().role(), role);
            }
            role = engine.context().role();
            if training.is_some() {
                prop_assert_eq!(engine.context().training(), training);
            }
            training = engine.context().training();

            // Quiz answers track submissions in the question states.
            prop_assert!(engine.context().quiz_answers().len() <= QUIZ_LENGTH);
            prop_assert_eq!(engine.context().quiz_answers().len(), quiz_submissions);

            if let Some(score) = engine.context().quiz_score() {
                prop_assert!((PASSING_SCORE..MAX_SCORE).contains(&score));
                prop_assert_eq!(engine.context().quiz_answers().len(), QUIZ_LENGTH);
            }
            if engine.state().ordinal() >= ConversationState::QuizResults.ordinal() {
                prop_assert_eq!(engine.context().quiz_answers().len(), QUIZ_LENGTH);
            }
        }
    }

    #[test]
    fn quiz_results_after_exactly_three_answers(
        answers in prop::collection::vec("[a-z0-9][a-z0-9 ]{0,11}", 3),
        seed in any::<u64>(),
    ) {
        let mut engine = new_engine(seed);
        engine.submit_choice("student").unwrap();
        engine.submit_choice("smarttech").unwrap();
        engine.submit_text("logic / algebra");
        engine.submit_text("yes");

        for (i, answer) in answers.iter().enumerate() {
            prop_assert!(engine.state().is_quiz_question());
            engine.submit_text(answer);
            prop_assert_eq!(engine.context().quiz_answers().len(), i + 1);
        }

        prop_assert_eq!(engine.state(), ConversationState::QuizResults);
        let score = engine.context().quiz_score().unwrap();
        prop_assert!((PASSING_SCORE..MAX_SCORE).contains(&score));
    }
}
