//! Types for representing the content of a rendered deck as read back from disk.

use serde::{Deserialize, Serialize};

/// A deck read back from its serialized form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckSummary {
    /// Slide width in EMUs.
    pub slide_width: i64,

    /// Slide height in EMUs.
    pub slide_height: i64,

    /// Slides in presentation order.
    pub slides: Vec<SlideSummary>,
}

impl DeckSummary {
    /// Create an empty summary with the given canvas size.
    pub fn new(slide_width: i64, slide_height: i64) -> Self {
        Self {
            slide_width,
            slide_height,
            slides: Vec::new(),
        }
    }

    /// Add a slide to the summary.
    pub fn add_slide(&mut self, slide: SlideSummary) {
        self.slides.push(slide);
    }

    /// Whether the canvas is square.
    pub fn is_square(&self) -> bool {
        self.slide_width == self.slide_height
    }

    /// Get all text regions from all slides, flattened.
    pub fn all_texts(&self) -> Vec<&str> {
        self.slides
            .iter()
            .flat_map(|s| s.regions.iter().map(|r| r.text.as_str()))
            .collect()
    }
}

/// A single slide of a deck.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideSummary {
    /// 1-based slide number.
    pub number: usize,

    /// Solid background colour as `RRGGBB`, if one is set.
    pub background: Option<String>,

    /// Text regions on this slide, in reading order.
    pub regions: Vec<TextRegion>,
}

impl SlideSummary {
    /// Create a new slide with the given number.
    pub fn new(number: usize) -> Self {
        Self {
            number,
            background: None,
            regions: Vec::new(),
        }
    }

    /// Sort regions by position (top-to-bottom, then left-to-right).
    pub fn sort_by_position(&mut self) {
        self.regions.sort_by(|a, b| a.y.cmp(&b.y).then(a.x.cmp(&b.x)));
    }

    /// Text of each region, in reading order.
    pub fn texts(&self) -> Vec<&str> {
        self.regions.iter().map(|r| r.text.as_str()).collect()
    }
}

/// Visible styling of the first run of a text region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Latin typeface name.
    pub font: Option<String>,

    /// Font size in hundredths of a point.
    pub size: Option<u32>,

    pub bold: bool,

    /// Text colour as `RRGGBB`.
    pub color: Option<String>,

    /// Paragraph alignment (`l`, `ctr`, `r`, ...).
    pub align: Option<String>,

    /// Vertical anchor of the text body (`t`, `ctr`, `b`).
    pub anchor: Option<String>,

    /// Left, top, right and bottom insets in EMUs.
    pub insets: [Option<i64>; 4],
}

/// Text content of one shape, with its position and styling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextRegion {
    /// Full text; paragraphs and line breaks are joined with `\n`.
    pub text: String,

    /// X offset in EMUs.
    pub x: i64,

    /// Y offset in EMUs.
    pub y: i64,

    pub style: TextStyle,
}

impl TextRegion {
    /// Create a region at a position with default styling.
    pub fn new(text: impl Into<String>, x: i64, y: i64) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            style: TextStyle::default(),
        }
    }
}
