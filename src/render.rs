use teloxide::types::{KeyboardButton, KeyboardMarkup};
use teloxide::utils::html;

use crate::config::Config;
use crate::quiz::{rank, PresentedQuestion, ScoredResult};

pub const TITLE: &str = "StudyMate";
pub const DESCRIPTION: &str = "A dynamic quiz that reveals the study techniques best suited to your learning style, with visual examples and instant results.";
pub const RETAKE_QUIZ: &str = "Retake Quiz";
pub const RESTART_COMMAND: &str = "/restart";

pub fn greeting() -> String {
    format!(
        "<b>{}</b>: a quiz that helps you discover study methods that suit your current learning preferences.\n\n{}\n\nAnswer each statement honestly. You can start over at any time with {}.",
        TITLE, DESCRIPTION, RESTART_COMMAND
    )
}

pub fn question_text(question: &PresentedQuestion, total: usize) -> String {
    format!(
        "<b>Question {} of {}</b>\n\n{}",
        question.index + 1,
        total,
        html::escape(&question.text)
    )
}

/// One option per row, top to bottom in display order.
pub fn question_keyboard(question: &PresentedQuestion) -> KeyboardMarkup {
    KeyboardMarkup::new(
        question
            .options
            .iter()
            .map(|o| vec![KeyboardButton::new(o.clone())])
            .collect::<Vec<_>>(),
    )
}

pub fn result_text(best: &ScoredResult, results: &[ScoredResult], config: &Config) -> String {
    let breakdown = rank(results)
        .iter()
        .enumerate()
        .map(|(i, r)| format!("{}. {}: {}", i + 1, html::escape(r.method()), r.score))
        .collect::<Vec<_>>()
        .join("\n");

    let image = config.image_url(&best.template.image);

    format!(
        "<b>Your Best Study Method</b>\n\n<b>{}</b>\n{}\n\n<a href=\"{}\">{}</a>\n\n<i>All methods:</i>\n{}",
        html::escape(&best.template.method),
        html::escape(&best.template.example),
        html::escape(&image),
        html::escape(&image),
        breakdown
    )
}

pub fn retake_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![KeyboardButton::new(RETAKE_QUIZ)]])
}
