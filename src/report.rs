//! Printable session summary
//!
//! Renders a finished session as a Markdown certificate followed by the
//! scripture review, for saving to disk or copying to the clipboard.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use textwrap::Options;

use crate::quiz::{Chapter, Outcome, Review, Summary, option_letter};

/// Column width of wrapped prose
const WIDTH: usize = 76;

/// Render a summary as Markdown
pub fn render(summary: &Summary<'_>) -> String {
    let mut blocks = vec![
        format!("# {}", summary.title),
        format!(
            "Certificate of completion for the Gospel of St. Luke, chapter {}.",
            summary.config.chapter
        ),
        format!(
            "- Level: {}\n- Difficulty: {}\n- Score: {}/{} ({}% mastery)",
            summary.config.level,
            summary.config.difficulty,
            summary.score,
            summary.total,
            summary.percent()
        ),
        "## Scripture Review".to_string(),
    ];

    for review in &summary.reviews {
        blocks.extend(review_blocks(review));
    }

    let mut out = blocks.join("\n\n");
    out.push('\n');
    out
}

fn review_blocks(review: &Review<'_>) -> [String; 4] {
    let question = review.question;
    let heading = match review.outcome.badge() {
        Some(badge) => format!("### Question {} [{}]", review.number, badge),
        None => format!("### Question {}", review.number),
    };

    let mut answers = format!(
        "- Correct answer: {}. {}",
        option_letter(question.correct_index()),
        question.correct_option()
    );
    match review.outcome {
        Outcome::Correct => {}
        Outcome::Incorrect { chosen } => answers.push_str(&format!(
            "\n- Your answer: {}. {}",
            option_letter(chosen),
            review.chosen_option().unwrap_or_default()
        )),
        Outcome::Skipped => answers.push_str("\n- Not answered"),
    }

    let insight = textwrap::fill(
        question.explanation(),
        Options::new(WIDTH).initial_indent("> ").subsequent_indent("> "),
    );

    [heading, textwrap::fill(question.prompt(), WIDTH), answers, insight]
}

/// File name for a chapter's summary
pub fn file_name(chapter: Chapter) -> String {
    format!("luke-ch{:02}-summary.md", chapter.number())
}

/// Write the rendered summary into `dir`, returning the file path
pub fn write_to(dir: &Path, summary: &Summary<'_>) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {:?}", dir))?;

    let path = dir.join(file_name(summary.config.chapter));
    std::fs::write(&path, render(summary))
        .with_context(|| format!("Failed to write summary to {:?}", path))?;

    tracing::info!(path = %path.display(), "wrote session summary");
    Ok(path)
}
