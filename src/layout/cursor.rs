//! Vertical cursor tracking the write position across pages.

use crate::error::LaudoError;
use crate::layout::PageGeometry;

/// Tolerance for boundary comparisons, so content measured to exactly fill
/// a page does not spill onto the next one through float drift.
const EPSILON: f64 = 1e-6;

/// Tracks the current vertical position and page while content flows top to
/// bottom. `y` always satisfies `top <= y <= limit`; crossing the limit
/// starts a new page rather than writing into the bottom margin.
#[derive(Debug, Clone)]
pub struct PageCursor {
    top: f64,
    limit: f64,
    y: f64,
    page_index: usize,
}

impl PageCursor {
    pub fn new(page_height: f64, top_margin: f64, bottom_margin: f64) -> Result<Self, LaudoError> {
        if page_height <= 0.0 {
            return Err(LaudoError::InvalidLayout(format!(
                "page height must be positive, got {}",
                page_height
            )));
        }
        if top_margin < 0.0 || bottom_margin < 0.0 {
            return Err(LaudoError::InvalidLayout(
                "page margins must not be negative".to_string(),
            ));
        }
        let limit = page_height - bottom_margin;
        if top_margin >= limit {
            return Err(LaudoError::InvalidLayout(
                "vertical margins leave no content height".to_string(),
            ));
        }
        Ok(Self {
            top: top_margin,
            limit,
            y: top_margin,
            page_index: 0,
        })
    }

    pub fn from_geometry(geometry: &PageGeometry) -> Result<Self, LaudoError> {
        geometry.validate()?;
        Self::new(geometry.height(), geometry.margin.top, geometry.margin.bottom)
    }

    /// Moves the cursor down by `by` points. If the move would cross into
    /// the bottom margin, the cursor jumps to the top of a fresh page
    /// instead (without applying `by`) and `true` is returned so the caller
    /// can re-issue the move on the new page.
    pub fn advance(&mut self, by: f64) -> bool {
        if self.y + by > self.limit + EPSILON {
            log::trace!(
                "content overflow at y {:.2} (+{:.2} > {:.2}), starting page {}",
                self.y,
                by,
                self.limit,
                self.page_index + 1
            );
            self.page_index += 1;
            self.y = self.top;
            true
        } else {
            self.y += by;
            false
        }
    }

    /// Whether `needed` points still fit on the current page. Never moves
    /// the cursor.
    pub fn ensure_space(&self, needed: f64) -> bool {
        self.y + needed <= self.limit + EPSILON
    }

    pub fn force_new_page(&mut self) {
        self.page_index += 1;
        self.y = self.top;
        log::trace!("forced break, starting page {}", self.page_index);
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn remaining(&self) -> f64 {
        self.limit - self.y
    }

    pub fn at_page_top(&self) -> bool {
        (self.y - self.top).abs() < EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Edges, PageSize};

    #[test]
    fn test_starts_at_top_margin_of_first_page() {
        let cursor = PageCursor::new(841.89, 54.0, 54.0).unwrap();
        assert!((cursor.y() - 54.0).abs() < 0.001);
        assert_eq!(cursor.page_index(), 0);
        assert!(cursor.at_page_top());
    }

    #[test]
    fn test_advance_accumulates_within_page() {
        let mut cursor = PageCursor::new(100.0, 10.0, 10.0).unwrap();
        assert!(!cursor.advance(30.0));
        assert!(!cursor.advance(20.0));
        assert!((cursor.y() - 60.0).abs() < 0.001);
        assert_eq!(cursor.page_index(), 0);
        assert!(!cursor.at_page_top());
    }

    #[test]
    fn test_exact_fill_breaks_only_on_next_advance() {
        // Limit is 90; two 40pt moves land exactly on it.
        let mut cursor = PageCursor::new(100.0, 10.0, 10.0).unwrap();
        assert!(!cursor.advance(40.0));
        assert!(!cursor.advance(40.0));
        assert!((cursor.y() - 90.0).abs() < 0.001);
        assert_eq!(cursor.page_index(), 0);

        assert!(cursor.advance(10.0));
        assert_eq!(cursor.page_index(), 1);
        assert!((cursor.y() - 10.0).abs() < 0.001);
        assert!(cursor.at_page_top());
    }

    #[test]
    fn test_epsilon_absorbs_float_drift_at_the_boundary() {
        let mut cursor = PageCursor::new(100.0, 10.0, 10.0).unwrap();
        assert!(!cursor.advance(40.0));
        // A hair over the limit from accumulated float error still fits.
        assert!(!cursor.advance(40.0000001));
        assert_eq!(cursor.page_index(), 0);
    }

    #[test]
    fn test_ensure_space_peeks_without_moving() {
        let mut cursor = PageCursor::new(100.0, 10.0, 10.0).unwrap();
        cursor.advance(50.0);
        assert!(cursor.ensure_space(30.0));
        assert!(cursor.ensure_space(30.0)); // repeatable
        assert!(!cursor.ensure_space(30.1));
        assert!((cursor.y() - 60.0).abs() < 0.001);
        assert_eq!(cursor.page_index(), 0);
    }

    #[test]
    fn test_force_new_page_resets_to_top() {
        let mut cursor = PageCursor::new(100.0, 10.0, 10.0).unwrap();
        cursor.advance(25.0);
        cursor.force_new_page();
        assert_eq!(cursor.page_index(), 1);
        assert!((cursor.y() - 10.0).abs() < 0.001);
        assert!(cursor.at_page_top());
    }

    #[test]
    fn test_page_index_never_decreases() {
        let mut cursor = PageCursor::new(100.0, 10.0, 10.0).unwrap();
        let mut last = cursor.page_index();
        for _ in 0..40 {
            cursor.advance(17.3);
            assert!(cursor.page_index() >= last);
            last = cursor.page_index();
        }
        assert!(last >= 8);
    }

    #[test]
    fn test_rejects_unusable_vertical_geometry() {
        assert!(PageCursor::new(-5.0, 0.0, 0.0).is_err());
        assert!(PageCursor::new(100.0, -1.0, 0.0).is_err());
        assert!(PageCursor::new(100.0, 60.0, 60.0).is_err());
    }

    #[test]
    fn test_from_geometry_uses_margins() {
        let geometry = PageGeometry {
            size: PageSize::Custom {
                width: 400.0,
                height: 150.0,
            },
            margin: Edges::uniform(20.0),
        };
        let cursor = PageCursor::from_geometry(&geometry).unwrap();
        assert!((cursor.y() - 20.0).abs() < 0.001);
        assert!((cursor.remaining() - 110.0).abs() < 0.001);
    }
}
