//! Plain-text rendering of decks and outlines for terminal output.
//!
//! Each slide becomes a block of lines; blocks are separated by a blank line.

use crate::outline::Outline;
use crate::types::DeckSummary;

/// Formatter for printing slide text to a terminal.
#[derive(Debug, Clone, Default)]
pub struct SlideTextFormatter {
    /// Prefix each block with `[n]`.
    numbered: bool,
}

impl SlideTextFormatter {
    /// Create a formatter without slide numbers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether each block is prefixed with its slide number.
    pub fn with_numbers(mut self, numbered: bool) -> Self {
        self.numbered = numbered;
        self
    }

    /// Format blocks of lines, one block per slide.
    ///
    /// # Example output
    /// ```text
    /// Game Theory
    /// Outsmart, don't outspend
    ///
    /// What is a Nash equilibrium?
    /// A state where no player benefits from changing strategy alone.
    /// ```
    pub fn format_blocks(&self, blocks: &[Vec<&str>]) -> String {
        blocks
            .iter()
            .enumerate()
            .map(|(idx, lines)| {
                let body = lines.join("\n");
                if self.numbered {
                    format!("[{}]\n{}", idx + 1, body)
                } else {
                    body
                }
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Format every slide of a deck read back from disk.
    pub fn format_deck(&self, deck: &DeckSummary) -> String {
        let blocks: Vec<Vec<&str>> = deck.slides.iter().map(|s| s.texts()).collect();
        with_newline(self.format_blocks(&blocks))
    }

    /// Format an outline the way its deck would read.
    pub fn format_outline(&self, outline: &Outline) -> String {
        let cover = outline.cover();
        let mut blocks = vec![vec![cover.title(), cover.subtitle()]];
        blocks.extend(
            outline
                .qa_slides()
                .iter()
                .map(|qa| vec![qa.question(), qa.answer()]),
        );
        with_newline(self.format_blocks(&blocks))
    }
}

fn with_newline(formatted: String) -> String {
    if formatted.is_empty() {
        formatted
    } else {
        format!("{}\n", formatted)
    }
}
