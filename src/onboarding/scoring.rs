//! Simulated quiz scoring.
//!
//! Answers are not graded; every score lands in the qualifying band.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Lowest score the scorer produces. Also the qualifying threshold.
pub const PASSING_SCORE: u8 = 70;
/// Exclusive upper bound of a score.
pub const MAX_SCORE: u8 = 100;

/// Produces a quiz score from the submitted answers.
pub trait QuizScorer: Send {
    /// Must return a value in `PASSING_SCORE..MAX_SCORE`.
    fn score(&mut self, answers: &[String]) -> u8;
}

/// Uniform random score in `70..=99`.
#[derive(Debug)]
pub struct RandomScorer {
    rng: StdRng,
}

impl RandomScorer {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible scores for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomScorer {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl QuizScorer for RandomScorer {
    fn score(&mut self, _answers: &[String]) -> u8 {
        self.rng.gen_range(PASSING_SCORE..MAX_SCORE)
    }
}

/// Always returns the same score, clamped into the valid band.
#[derive(Debug, Clone, Copy)]
pub struct FixedScorer(pub u8);

impl QuizScorer for FixedScorer {
    fn score(&mut self, _answers: &[String]) -> u8 {
        self.0.clamp(PASSING_SCORE, MAX_SCORE - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_scores_stay_in_band() {
        let mut scorer = RandomScorer::from_entropy();
        let answers = vec!["32".to_string(), "4".to_string(), "industry".to_string()];
        for _ in 0..1_000 {
            let score = scorer.score(&answers);
            assert!((PASSING_SCORE..MAX_SCORE).contains(&score), "got {score}");
        }
    }

    #[test]
    fn seeded_scorer_is_reproducible() {
        let mut a = RandomScorer::seeded(7);
        let mut b = RandomScorer::seeded(7);
        for _ in 0..20 {
            assert_eq!(a.score(&[]), b.score(&[]));
        }
    }

    #[test]
    fn fixed_scorer_clamps() {
        assert_eq!(FixedScorer(85).score(&[]), 85);
        assert_eq!(FixedScorer(10).score(&[]), PASSING_SCORE);
        assert_eq!(FixedScorer(250).score(&[]), MAX_SCORE - 1);
    }
}
