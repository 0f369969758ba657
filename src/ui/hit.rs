//! Mapping terminal cells back to document elements.

use folio::core::dom::ElementId;
use ratatui::layout::{Position, Rect};

/// Regions registered while drawing a frame.  Later regions sit on top.
#[derive(Debug, Default)]
pub struct HitMap {
    regions: Vec<(Rect, ElementId)>,
}

impl HitMap {
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn push(&mut self, area: Rect, el: ElementId) {
        if !area.is_empty() {
            self.regions.push((area, el));
        }
    }

    /// Topmost element at the cell.
    pub fn at(&self, column: u16, row: u16) -> Option<ElementId> {
        let cell = Position::new(column, row);
        self.regions
            .iter()
            .rev()
            .find(|(area, _)| area.contains(cell))
            .map(|&(_, el)| el)
    }
}
