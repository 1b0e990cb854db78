//! The single carousel look: square canvas, black background, white Calibri text.

/// EMUs per inch (914400 EMU = 1 inch).
pub const EMU_PER_INCH: i64 = 914_400;

/// Width and height of every slide: 11.25 inches.
pub const SLIDE_SIZE: i64 = EMU_PER_INCH * 45 / 4;

/// Horizontal margin between the slide edge and each text region.
const SIDE_MARGIN: i64 = EMU_PER_INCH * 3 / 4;

/// Width of every text region.
const REGION_WIDTH: i64 = SLIDE_SIZE - 2 * SIDE_MARGIN;

/// Slide background colour.
pub const BACKGROUND_COLOR: &str = "000000";

/// Colour of all text.
pub const TEXT_COLOR: &str = "FFFFFF";

/// Typeface of all text.
pub const FONT_FACE: &str = "Calibri";

/// Placement of a text region in EMUs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}

/// The four kinds of text region a deck contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Title,
    Subtitle,
    Question,
    Answer,
}

impl Region {
    /// Font size in points.
    pub fn font_size_pt(self) -> u32 {
        match self {
            Region::Title => 54,
            Region::Subtitle => 34,
            Region::Question => 40,
            Region::Answer => 30,
        }
    }

    /// Font size in hundredths of a point, as written to `a:rPr/@sz`.
    pub fn font_size(self) -> u32 {
        self.font_size_pt() * 100
    }

    pub fn bold(self) -> bool {
        matches!(self, Region::Title | Region::Question)
    }

    /// Shape name shown in PowerPoint's selection pane.
    pub fn shape_name(self) -> &'static str {
        match self {
            Region::Title => "Title",
            Region::Subtitle => "Subtitle",
            Region::Question => "Question",
            Region::Answer => "Answer",
        }
    }

    pub fn frame(self) -> Frame {
        let (y, cy) = match self {
            Region::Title => (EMU_PER_INCH * 15 / 4, EMU_PER_INCH * 3),
            Region::Subtitle => (EMU_PER_INCH * 7, EMU_PER_INCH * 2),
            Region::Question => (EMU_PER_INCH * 3 / 2, EMU_PER_INCH * 3),
            Region::Answer => (EMU_PER_INCH * 5, EMU_PER_INCH * 5),
        };
        Frame {
            x: SIDE_MARGIN,
            y,
            cx: REGION_WIDTH,
            cy,
        }
    }
}
