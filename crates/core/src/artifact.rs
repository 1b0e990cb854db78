//! The downloadable deck produced for a submission.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// MIME type of a PowerPoint (OOXML) presentation.
pub const PPTX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

/// Prefix of every generated deck file name.
const FILE_NAME_PREFIX: &str = "LinkedIn_Carousel_";

/// Longest stem kept from a topic, in characters.
pub const MAX_STEM_CHARS: usize = 100;

/// Make a topic safe for use in a file name.
///
/// Accents are folded to their base letter, then every character that is not
/// an ASCII letter or digit becomes `_`. Stems longer than
/// [`MAX_STEM_CHARS`] are cut and lose any trailing `_`.
pub fn safe_file_stem(topic: &str) -> String {
    let mut stem: String = topic
        .trim()
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();

    if stem.len() > MAX_STEM_CHARS {
        stem.truncate(MAX_STEM_CHARS);
        let kept = stem.trim_end_matches('_').len();
        stem.truncate(kept);
    }
    stem
}

/// File name offered for download, e.g. `LinkedIn_Carousel_Game_Theory.pptx`.
pub fn deck_file_name(topic: &str) -> String {
    format!("{}{}.pptx", FILE_NAME_PREFIX, safe_file_stem(topic))
}

/// A rendered deck ready to hand to the caller.
#[derive(Debug, Clone)]
pub struct DeckArtifact {
    /// Suggested download file name.
    pub file_name: String,

    /// MIME type of `bytes`.
    pub content_type: &'static str,

    /// Serialized presentation.
    pub bytes: Vec<u8>,

    /// Number of slides in the deck.
    pub slide_count: usize,
}

impl DeckArtifact {
    /// Wrap rendered PPTX bytes for a topic.
    pub fn pptx(topic: &str, bytes: Vec<u8>, slide_count: usize) -> Self {
        Self {
            file_name: deck_file_name(topic),
            content_type: PPTX_CONTENT_TYPE,
            bytes,
            slide_count,
        }
    }
}
