//! Scroll-position bookkeeping for the dashboard navigation bar.
//!
//! The active-link highlight is plain arithmetic over measured section
//! geometry, so it can be tested without a DOM. The browser layer measures
//! each `section[id]` into a `SectionBounds` and feeds the current scroll
//! offset through `compute_active_section` on every scroll event.

/// Pixels kept clear for the fixed header when scrolling to a section.
pub const HEADER_CLEARANCE_PX: f64 = 100.0;

/// Slack added above each section when deciding the active highlight.
pub const SCROLLSPY_MARGIN_PX: f64 = 150.0;

/// Measured geometry of one `section[id]` element.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    /// Offset of the section top from the document top, in pixels
    pub top: f64,
    pub height: f64,
}

/// The section the viewport currently sits in, if any.
///
/// A section is active while the scroll offset lies in
/// `[top - SCROLLSPY_MARGIN_PX, top - SCROLLSPY_MARGIN_PX + height)`.
/// When the margin makes several sections match at once, the last one in
/// document order wins.
pub fn compute_active_section(scroll_offset: f64, sections: &[SectionBounds]) -> Option<&str> {
    let mut active = None;
    for section in sections {
        let start = section.top - SCROLLSPY_MARGIN_PX;
        if scroll_offset >= start && scroll_offset < start + section.height {
            active = Some(section.id.as_str());
        }
    }
    active
}

/// Scroll destination for a navigation click on a section at `section_top`.
pub fn scroll_target(section_top: f64) -> f64 {
    section_top - HEADER_CLEARANCE_PX
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(id: &str, top: f64, height: f64) -> SectionBounds {
        SectionBounds {
            id: id.to_string(),
            top,
            height,
        }
    }

    #[test]
    fn test_no_section_above_the_first() {
        let sections = vec![section("apercu", 400.0, 600.0)];
        assert_eq!(compute_active_section(0.0, &sections), None);
        assert_eq!(compute_active_section(249.9, &sections), None);
    }

    #[test]
    fn test_section_range_is_inclusive_exclusive() {
        let sections = vec![section("apercu", 400.0, 600.0)];
        // Active range is [250, 850).
        assert_eq!(compute_active_section(250.0, &sections), Some("apercu"));
        assert_eq!(compute_active_section(849.9, &sections), Some("apercu"));
        assert_eq!(compute_active_section(850.0, &sections), None);
    }

    #[test]
    fn test_last_matching_section_wins() {
        // The margin makes the second section active while the tail of the
        // first is still on screen.
        let sections = vec![
            section("apercu", 0.0, 700.0),
            section("carte", 600.0, 500.0),
        ];
        assert_eq!(compute_active_section(500.0, &sections), Some("carte"));
        assert_eq!(compute_active_section(300.0, &sections), Some("apercu"));
    }

    #[test]
    fn test_gap_between_sections_has_no_active() {
        let sections = vec![
            section("apercu", 200.0, 100.0),
            section("carte", 1000.0, 400.0),
        ];
        assert_eq!(compute_active_section(500.0, &sections), None);
    }

    #[test]
    fn test_empty_section_list() {
        assert_eq!(compute_active_section(123.0, &[]), None);
    }

    #[test]
    fn test_scroll_target_clears_the_header() {
        assert_eq!(scroll_target(500.0), 400.0);
        assert_eq!(scroll_target(50.0), -50.0);
    }
}
