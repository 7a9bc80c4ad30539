//! Layout helpers — split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen layout: the carousel strip centred vertically, a debug line and
/// the status bar at the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    /// Bordered carousel block.
    pub carousel_area: Rect,
    /// Inside of the carousel border; its width is the engine's viewport.
    pub strip_area: Rect,
    pub debug_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.  `item_height` is in
    /// rows and excludes the carousel border.
    pub fn from_area(area: Rect, item_height: u16) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // stage (takes all remaining space)
                Constraint::Length(1), // debug line
                Constraint::Length(1), // status bar
            ])
            .split(area);

        let stage = chunks[0];
        let height = item_height.saturating_add(2).min(stage.height);
        let top = stage.y + (stage.height - height) / 2;
        let carousel_area = Rect::new(stage.x, top, stage.width, height);
        let strip_area = Rect::new(
            carousel_area.x.saturating_add(1),
            carousel_area.y.saturating_add(1),
            carousel_area.width.saturating_sub(2),
            carousel_area.height.saturating_sub(2),
        );

        Self {
            carousel_area,
            strip_area,
            debug_area: chunks[1],
            status_area: chunks[2],
        }
    }

    /// Whether a pointer at (`col`, `row`) is on the carousel.
    pub fn hits_carousel(&self, col: u16, row: u16) -> bool {
        let a = self.carousel_area;
        col >= a.x && col < a.x + a.width && row >= a.y && row < a.y + a.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carousel_is_centred_in_the_stage() {
        let layout = AppLayout::from_area(Rect::new(0, 0, 80, 24), 5);
        assert_eq!(layout.status_area, Rect::new(0, 23, 80, 1));
        assert_eq!(layout.debug_area, Rect::new(0, 22, 80, 1));
        assert_eq!(layout.carousel_area, Rect::new(0, 7, 80, 7));
        assert_eq!(layout.strip_area, Rect::new(1, 8, 78, 5));
    }

    #[test]
    fn tall_items_are_clipped_to_the_stage() {
        let layout = AppLayout::from_area(Rect::new(0, 0, 40, 10), 50);
        assert_eq!(layout.carousel_area.height, 8);
        assert_eq!(layout.strip_area.height, 6);
    }

    #[test]
    fn hit_testing() {
        let layout = AppLayout::from_area(Rect::new(0, 0, 80, 24), 5);
        assert!(layout.hits_carousel(0, 7));
        assert!(layout.hits_carousel(79, 13));
        assert!(!layout.hits_carousel(10, 6));
        assert!(!layout.hits_carousel(10, 14));
    }
}
