use crate::quiz::catalog::ResultTemplate;
use crate::quiz::error::QuizError;
use crate::quiz::Score;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ScoredResult {
    #[serde(flatten)]
    pub template: ResultTemplate,
    pub score: Score,
}

impl ScoredResult {
    pub fn new(template: ResultTemplate, score: Score) -> Self {
        Self { template, score }
    }

    pub fn method(&self) -> &str {
        &self.template.method
    }
}

/// Zips the answers with the result templates by index. Output keeps catalog
/// order; nothing is sorted or blended across questions.
pub fn compute_results(
    templates: &[ResultTemplate],
    answers: &[Score],
) -> Result<Vec<ScoredResult>, QuizError> {
    if answers.len() != templates.len() {
        return Err(QuizError::AnswerCountMismatch {
            expected: templates.len(),
            actual: answers.len(),
        });
    }

    Ok(templates
        .iter()
        .zip(answers)
        .map(|(template, score)| ScoredResult::new(template.clone(), *score))
        .collect())
}

/// Highest score wins; on a tie the earliest result in catalog order is kept.
/// `None` only for an empty slice.
pub fn select_best(results: &[ScoredResult]) -> Option<&ScoredResult> {
    results
        .iter()
        .reduce(|best, current| if current.score > best.score { current } else { best })
}

/// Results from best to worst. The sort is stable, so ties keep catalog order
/// and the head is always what `select_best` returns.
pub fn rank(results: &[ScoredResult]) -> Vec<&ScoredResult> {
    let mut ranked: Vec<&ScoredResult> = results.iter().collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}
