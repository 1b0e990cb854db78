//! PPTX (Office Open XML) backend for carousel decks.
//!
//! Writes square black-and-white decks from an outline and reads `.pptx`
//! files back into styled text regions.

pub mod parser;
pub mod template;
pub mod theme;
pub mod writer;

pub use parser::DeckReader;
pub use writer::PptxRenderer;

#[cfg(test)]
mod tests {
    use super::*;
    use carousel_core::{CoverRecord, DeckRenderer, DeckSummary, Outline, QaRecord};
    use std::io::Cursor;
    use crate::theme::Region;

    fn game_theory() -> Outline {
        Outline::new(
            CoverRecord::new("Game Theory", "Outsmart, don't outspend"),
            vec![
                QaRecord::new(
                    2,
                    "What is a Nash equilibrium?",
                    "A state where no player benefits from changing strategy alone.",
                ),
                QaRecord::new(3, "What is a zero-sum game?", "One player's gain is another's loss."),
                QaRecord::new(
                    4,
                    "What is a dominant strategy?",
                    "A strategy that is best\nregardless of what others do.",
                ),
                QaRecord::new(5, "Why study <games> & players?", "  Incentives shape outcomes.  "),
                QaRecord::new(6, "Where is it used?", "Economics, biology, politics and computing."),
            ],
        )
    }

    fn render_and_read(outline: &Outline) -> DeckSummary {
        let bytes = PptxRenderer::new().render(outline).unwrap();
        DeckReader::new().read(Cursor::new(bytes)).unwrap()
    }

    #[test]
    fn test_slide_count_matches_outline() {
        let outline = game_theory();
        let deck = render_and_read(&outline);
        assert_eq!(deck.slides.len(), 1 + outline.qa_slides().len());
        assert!(deck.is_square());
        assert_eq!(deck.slide_width, theme::SLIDE_SIZE);
    }

    #[test]
    fn test_text_regions_match_records_exactly() {
        let outline = game_theory();
        let deck = render_and_read(&outline);

        assert_eq!(
            deck.slides[0].texts(),
            vec![outline.cover().title(), outline.cover().subtitle()]
        );
        for (idx, qa) in outline.qa_slides().iter().enumerate() {
            assert_eq!(deck.slides[idx + 1].texts(), vec![qa.question(), qa.answer()]);
        }
    }

    #[test]
    fn test_every_slide_uses_theme() {
        let deck = render_and_read(&game_theory());

        for slide in &deck.slides {
            assert_eq!(slide.background.as_deref(), Some(theme::BACKGROUND_COLOR));
            assert_eq!(slide.regions.len(), 2);
            for region in &slide.regions {
                let style = &region.style;
                assert_eq!(style.font.as_deref(), Some(theme::FONT_FACE));
                assert_eq!(style.color.as_deref(), Some(theme::TEXT_COLOR));
                assert_eq!(style.align.as_deref(), Some("l"));
                assert_eq!(style.anchor.as_deref(), Some("t"));
                assert_eq!(style.insets, [Some(0); 4]);
            }
        }
    }

    #[test]
    fn test_font_scales_per_region() {
        let deck = render_and_read(&game_theory());

        let cover = &deck.slides[0].regions;
        assert_eq!(cover[0].style.size, Some(Region::Title.font_size()));
        assert!(cover[0].style.bold);
        assert_eq!(cover[1].style.size, Some(Region::Subtitle.font_size()));
        assert!(!cover[1].style.bold);

        for slide in &deck.slides[1..] {
            assert_eq!(slide.regions[0].style.size, Some(Region::Question.font_size()));
            assert!(slide.regions[0].style.bold);
            assert_eq!(slide.regions[1].style.size, Some(Region::Answer.font_size()));
            assert!(!slide.regions[1].style.bold);
        }
    }

    #[test]
    fn test_rendering_twice_reads_identically() {
        let outline = game_theory();
        let first = visible_summary(&render_and_read(&outline));
        let second = visible_summary(&render_and_read(&outline));
        assert_eq!(first, second);
    }

    /// Flatten everything visible about a deck into comparable strings.
    fn visible_summary(deck: &DeckSummary) -> Vec<String> {
        deck.slides
            .iter()
            .flat_map(|s| {
                s.regions
                    .iter()
                    .map(move |r| format!("{:?}|{}|{}|{}|{:?}", s.background, r.text, r.x, r.y, r.style))
            })
            .collect()
    }
}
