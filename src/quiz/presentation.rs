use rand::seq::SliceRandom;
use rand::Rng;

use crate::quiz::catalog::Question;
use crate::quiz::Score;

/// One visit of a question: its options in the order they were shown.
///
/// The score of an option follows its display position, not its meaning:
/// the top option is worth `len - 1`, the bottom one `0`. The same value is
/// used to draw the keyboard and to map the tapped label back to a score, so
/// the two always agree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentedQuestion {
    pub index: usize,
    pub text: String,
    pub options: Vec<String>,
}

impl PresentedQuestion {
    pub fn shuffled<R: Rng + ?Sized>(index: usize, question: &Question, rng: &mut R) -> Self {
        let mut options = question.options.clone();
        options.shuffle(rng);
        Self {
            index,
            text: question.text.clone(),
            options,
        }
    }

    pub fn score_at(&self, position: usize) -> Option<Score> {
        if position >= self.options.len() {
            return None;
        }
        Score::try_from(self.options.len() - 1 - position).ok()
    }

    pub fn score_for(&self, label: &str) -> Option<Score> {
        let position = self.options.iter().position(|o| o == label)?;
        self.score_at(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn likert() -> Question {
        Question::new(
            "I use flashcards to drill information.".to_string(),
            ["Strongly Agree", "Agree", "Neutral", "Disagree", "Strongly Disagree"]
                .iter()
                .map(|o| o.to_string())
                .collect(),
        )
    }

    #[test]
    fn shuffle_keeps_every_label_exactly_once() {
        let mut rng = StdRng::seed_from_u64(7);
        let question = likert();
        let presented = PresentedQuestion::shuffled(3, &question, &mut rng);

        let mut shown = presented.options.clone();
        shown.sort();
        let mut expected = question.options.clone();
        expected.sort();
        assert_eq!(shown, expected);
        assert_eq!(presented.index, 3);
        assert_eq!(presented.text, question.text);
    }

    #[test]
    fn score_follows_display_position() {
        let mut rng = StdRng::seed_from_u64(42);
        let presented = PresentedQuestion::shuffled(0, &likert(), &mut rng);

        for (position, label) in presented.options.iter().enumerate() {
            let expected = (presented.options.len() - 1 - position) as Score;
            assert_eq!(presented.score_for(label), Some(expected));
            assert_eq!(presented.score_at(position), Some(expected));
        }
        assert_eq!(presented.score_at(0), Some(4));
        assert_eq!(presented.score_at(4), Some(0));
    }

    #[test]
    fn unknown_labels_and_positions_have_no_score() {
        let mut rng = StdRng::seed_from_u64(1);
        let presented = PresentedQuestion::shuffled(0, &likert(), &mut rng);

        assert_eq!(presented.score_for("Sometimes"), None);
        assert_eq!(presented.score_at(5), None);
    }

    #[test]
    fn different_visits_can_order_options_differently() {
        let mut rng = StdRng::seed_from_u64(2024);
        let question = likert();
        let first = PresentedQuestion::shuffled(0, &question, &mut rng);
        let reordered = (0..50)
            .map(|_| PresentedQuestion::shuffled(0, &question, &mut rng))
            .any(|p| p.options != first.options);
        assert!(reordered);
    }
}
