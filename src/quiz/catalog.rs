use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

use crate::quiz::error::CatalogError;

const BUILTIN_CATALOG: &str = include_str!("../../assets/catalog.json");

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Question {
    pub text: String,
    pub options: Vec<String>,
}

impl Question {
    pub fn new(text: String, options: Vec<String>) -> Self {
        Self { text, options }
    }
}

/// What a user is shown as the outcome when the question at the same index
/// wins. `image` is an opaque reference, never loaded by the quiz itself.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ResultTemplate {
    pub method: String,
    pub image: String,
    pub example: String,
}

impl ResultTemplate {
    pub fn new(method: String, image: String, example: String) -> Self {
        Self {
            method,
            image,
            example,
        }
    }
}

/// Question and result catalogs, paired by index: the answer to
/// `questions[i]` is the score of `results[i]`.
///
/// Only constructible through validation, so a `QuizCatalog` in hand is
/// always non-empty with equal lengths.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct QuizCatalog {
    questions: Vec<Question>,
    results: Vec<ResultTemplate>,
}

#[derive(serde::Deserialize)]
struct RawCatalog {
    questions: Vec<Question>,
    results: Vec<ResultTemplate>,
}

impl QuizCatalog {
    pub fn new(
        questions: Vec<Question>,
        results: Vec<ResultTemplate>,
    ) -> Result<Self, CatalogError> {
        if questions.is_empty() || results.is_empty() {
            return Err(CatalogError::Empty);
        }
        if questions.len() != results.len() {
            return Err(CatalogError::LengthMismatch {
                questions: questions.len(),
                results: results.len(),
            });
        }

        for (index, question) in questions.iter().enumerate() {
            if question.options.is_empty() {
                return Err(CatalogError::NoOptions { index });
            }
            let mut seen = HashSet::new();
            if let Some(label) = question.options.iter().find(|o| !seen.insert(o.as_str())) {
                return Err(CatalogError::DuplicateOption {
                    index,
                    label: label.clone(),
                });
            }
        }

        Ok(Self { questions, results })
    }

    /// The study-method catalog shipped with the bot.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog = serde_json::from_str(json)?;
        Self::new(raw.questions, raw.results)
    }

    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let file = File::open(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: RawCatalog = serde_json::from_reader(file)?;
        Self::new(raw.questions, raw.results)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn results(&self) -> &[ResultTemplate] {
        &self.results
    }

    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }
}

#[cfg(test)]
pub(crate) fn sample_catalog(methods: &[&str]) -> QuizCatalog {
    let questions = methods
        .iter()
        .map(|m| {
            Question::new(
                format!("Do you like {}?", m),
                vec!["Yes".to_string(), "Maybe".to_string(), "No".to_string()],
            )
        })
        .collect();
    let results = methods
        .iter()
        .map(|m| ResultTemplate::new(m.to_string(), format!("/{}.png", m), String::new()))
        .collect();
    QuizCatalog::new(questions, results).expect("sample catalog is valid")
}
