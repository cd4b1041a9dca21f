use std::path::PathBuf;

use thiserror::Error;

/// Problems found while loading or validating a catalog. These are startup
/// errors: a bot with a broken catalog never starts serving quizzes.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog has no questions")]
    Empty,

    #[error("catalog has {questions} questions but {results} results")]
    LengthMismatch { questions: usize, results: usize },

    #[error("question #{index} has no options")]
    NoOptions { index: usize },

    #[error("question #{index} lists option \"{label}\" more than once")]
    DuplicateOption { index: usize, label: String },

    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("the quiz is already complete, reset it before answering again")]
    AlreadyComplete,

    #[error("expected {expected} answers, got {actual}")]
    AnswerCountMismatch { expected: usize, actual: usize },

    #[error("\"{0}\" is not one of the presented options")]
    UnknownOption(String),
}
