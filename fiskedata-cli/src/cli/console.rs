//! Terminal output for feedback events

use colored::*;
use fiskedata::{Feedback, FeedbackKind, FeedbackSink};

/// Prints feedback events to stderr with a colored kind tag
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleFeedback;

impl FeedbackSink for ConsoleFeedback {
    fn emit(&self, feedback: Feedback) {
        eprintln!("{}", render(&feedback));
    }
}

pub fn render(feedback: &Feedback) -> String {
    let tag = match feedback.kind {
        FeedbackKind::Error => "error".bright_red().bold(),
        FeedbackKind::Warning => "warning".yellow().bold(),
        FeedbackKind::Info => "info".cyan(),
        FeedbackKind::Success => "ok".bright_green().bold(),
    };

    format!("{} {} {}", tag, feedback.code.as_str().dimmed(), feedback.message)
}
