pub mod catalog;
pub mod error;
pub mod presentation;
pub mod scoring;

use std::sync::Arc;

use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub use catalog::{Question, QuizCatalog, ResultTemplate};
pub use error::{CatalogError, QuizError};
pub use presentation::PresentedQuestion;
pub use scoring::{compute_results, rank, select_best, ScoredResult};

/// Answer value for one question. Only the ordering matters.
pub type Score = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    InProgress,
    Complete,
}

/// Transient state of one run through the catalog.
///
/// `answers.len() == current_index` while in progress; `results` is set
/// exactly when every question has been answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    pub current_index: usize,
    pub answers: Vec<Score>,
    pub results: Option<Vec<ScoredResult>>,
    presented: Option<PresentedQuestion>,
}

impl QuizSession {
    fn start(catalog: &QuizCatalog, rng: &mut StdRng) -> Self {
        Self {
            current_index: 0,
            answers: Vec::with_capacity(catalog.len()),
            results: None,
            presented: catalog
                .question(0)
                .map(|q| PresentedQuestion::shuffled(0, q, rng)),
        }
    }

    pub fn phase(&self) -> Phase {
        match self.results {
            Some(_) => Phase::Complete,
            None => Phase::InProgress,
        }
    }
}

/// Drives a single user through the catalog: shows one question at a time,
/// collects the scores and, after the last answer, scores the results.
///
/// Every instance owns its session and random source; the catalog is shared
/// read-only.
#[derive(Debug, Clone)]
pub struct Quiz {
    catalog: Arc<QuizCatalog>,
    session: QuizSession,
    rng: StdRng,
}

impl Quiz {
    pub fn new(catalog: Arc<QuizCatalog>) -> Self {
        Self::with_rng(catalog, StdRng::from_entropy())
    }

    pub fn with_rng(catalog: Arc<QuizCatalog>, mut rng: StdRng) -> Self {
        let session = QuizSession::start(&catalog, &mut rng);
        Self {
            catalog,
            session,
            rng,
        }
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    pub fn current_index(&self) -> usize {
        self.session.current_index
    }

    pub fn question_count(&self) -> usize {
        self.catalog.len()
    }

    /// The question on screen with its options in display order. `None` once
    /// the quiz is complete.
    pub fn current_question(&self) -> Option<&PresentedQuestion> {
        match self.phase() {
            Phase::InProgress => self.session.presented.as_ref(),
            Phase::Complete => None,
        }
    }

    pub fn results(&self) -> Option<&[ScoredResult]> {
        self.session.results.as_deref()
    }

    pub fn best(&self) -> Option<&ScoredResult> {
        self.results().and_then(select_best)
    }

    /// Records the answer to the current question and moves on: either to
    /// the next question (with a fresh option order) or to scoring.
    pub fn submit_answer(&mut self, score: Score) -> Result<Phase, QuizError> {
        if self.phase() == Phase::Complete {
            return Err(QuizError::AlreadyComplete);
        }

        let next_index = self.session.current_index + 1;
        if next_index < self.catalog.len() {
            let presented = self
                .catalog
                .question(next_index)
                .map(|q| PresentedQuestion::shuffled(next_index, q, &mut self.rng));
            self.session.answers.push(score);
            self.session.current_index = next_index;
            self.session.presented = presented;
            debug!("answered with {}, moving to question #{}", score, next_index + 1);
            return Ok(Phase::InProgress);
        }

        let mut answers = self.session.answers.clone();
        answers.push(score);
        let results = compute_results(self.catalog.results(), &answers)?;
        self.session.answers = answers;
        self.session.results = Some(results);
        self.session.presented = None;
        debug!("last question answered with {}, quiz complete", score);
        Ok(Phase::Complete)
    }

    /// Submits the score of a label from the current presentation.
    pub fn choose(&mut self, label: &str) -> Result<Phase, QuizError> {
        if self.phase() == Phase::Complete {
            return Err(QuizError::AlreadyComplete);
        }
        let score = self
            .session
            .presented
            .as_ref()
            .and_then(|p| p.score_for(label))
            .ok_or_else(|| QuizError::UnknownOption(label.to_string()))?;
        self.submit_answer(score)
    }

    pub fn reset(&mut self) {
        self.session = QuizSession::start(&self.catalog, &mut self.rng);
        debug!("quiz reset");
    }
}

#[cfg(test)]
mod tests {
    use super::catalog::sample_catalog;
    use super::*;

    fn quiz(methods: &[&str], seed: u64) -> Quiz {
        Quiz::with_rng(Arc::new(sample_catalog(methods)), StdRng::seed_from_u64(seed))
    }

    fn assert_initial(quiz: &Quiz) {
        let session = quiz.session();
        assert_eq!(session.current_index, 0);
        assert!(session.answers.is_empty());
        assert_eq!(session.results, None);
        assert_eq!(quiz.phase(), Phase::InProgress);
        assert_eq!(quiz.current_question().map(|q| q.index), Some(0));
    }

    #[test]
    fn starts_at_the_first_question() {
        let quiz = quiz(&["A", "B", "C"], 1);
        assert_initial(&quiz);
        assert_eq!(quiz.question_count(), 3);
        assert_eq!(
            quiz.current_question().map(|q| q.text.as_str()),
            Some("Do you like A?")
        );
    }

    #[test]
    fn stays_in_progress_until_the_last_answer() {
        let mut quiz = quiz(&["A", "B", "C", "D"], 2);

        for (calls, score) in [3, 0, 2].into_iter().enumerate() {
            assert_eq!(quiz.submit_answer(score), Ok(Phase::InProgress));
            assert_eq!(quiz.current_index(), calls + 1);
            assert_eq!(quiz.session().answers.len(), quiz.current_index());
        }
        assert_eq!(quiz.phase(), Phase::InProgress);
        assert_eq!(quiz.session().answers, vec![3, 0, 2]);
        assert_eq!(quiz.current_question().map(|q| q.index), Some(3));
        assert!(quiz.results().is_none());
    }

    #[test]
    fn completes_after_every_question_is_answered() {
        let mut quiz = quiz(&["A", "B", "C"], 3);

        quiz.submit_answer(2).unwrap();
        quiz.submit_answer(5).unwrap();
        assert_eq!(quiz.submit_answer(1), Ok(Phase::Complete));

        assert_eq!(quiz.phase(), Phase::Complete);
        assert!(quiz.current_question().is_none());
        let results = quiz.results().unwrap();
        assert_eq!(results.len(), 3);
        let zipped: Vec<(&str, Score)> = results.iter().map(|r| (r.method(), r.score)).collect();
        assert_eq!(zipped, vec![("A", 2), ("B", 5), ("C", 1)]);
        assert_eq!(quiz.best().map(|r| r.method()), Some("B"));
    }

    #[test]
    fn answering_a_complete_quiz_is_rejected_without_changes() {
        let mut quiz = quiz(&["A"], 4);
        quiz.submit_answer(1).unwrap();
        let before = quiz.session().clone();

        assert_eq!(quiz.submit_answer(4), Err(QuizError::AlreadyComplete));
        assert_eq!(quiz.choose("Yes"), Err(QuizError::AlreadyComplete));
        assert_eq!(quiz.session(), &before);
    }

    #[test]
    fn reset_returns_to_the_initial_state_from_any_phase() {
        let mut quiz = quiz(&["A", "B", "C"], 5);
        quiz.reset();
        assert_initial(&quiz);

        quiz.submit_answer(1).unwrap();
        quiz.reset();
        assert_initial(&quiz);

        for score in [1, 2, 3] {
            quiz.submit_answer(score).unwrap();
        }
        assert_eq!(quiz.phase(), Phase::Complete);
        quiz.reset();
        assert_initial(&quiz);
        quiz.reset();
        assert_initial(&quiz);
    }

    #[test]
    fn choosing_a_label_submits_the_score_it_was_shown_with() {
        let mut quiz = quiz(&["A", "B"], 6);

        let shown = quiz.current_question().unwrap().clone();
        let label = shown.options[0].clone();
        quiz.choose(&label).unwrap();
        assert_eq!(quiz.session().answers, vec![2]);

        let shown = quiz.current_question().unwrap().clone();
        let label = shown.options[2].clone();
        assert_eq!(quiz.choose(&label), Ok(Phase::Complete));
        assert_eq!(quiz.session().answers, vec![2, 0]);
    }

    #[test]
    fn unknown_label_leaves_the_question_on_screen() {
        let mut quiz = quiz(&["A", "B"], 7);
        let shown = quiz.current_question().unwrap().clone();

        assert_eq!(
            quiz.choose("Absolutely"),
            Err(QuizError::UnknownOption("Absolutely".to_string()))
        );
        assert_eq!(quiz.current_index(), 0);
        assert_eq!(quiz.current_question(), Some(&shown));
    }

    #[test]
    fn quizzes_sharing_a_catalog_are_independent() {
        let catalog = Arc::new(sample_catalog(&["A", "B"]));
        let mut first = Quiz::with_rng(catalog.clone(), StdRng::seed_from_u64(8));
        let second = Quiz::with_rng(catalog, StdRng::seed_from_u64(9));

        first.submit_answer(1).unwrap();
        assert_eq!(first.current_index(), 1);
        assert_initial(&second);
    }
}
