//! Page geometry: paper size, margins, and the fixed vertical sub-bands.

use crate::grid::LANES_PER_PAGE;

/// Points per millimeter.
pub const MM: f64 = 72.0 / 25.4;

/// Paper size presets, portrait orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    A5,
    A4,
    Letter,
}

impl PageSize {
    /// (width, height) in points.
    pub fn dimensions(self) -> (f64, f64) {
        match self {
            PageSize::A5 => (148.0 * MM, 210.0 * MM),
            PageSize::A4 => (210.0 * MM, 297.0 * MM),
            PageSize::Letter => (612.0, 792.0),
        }
    }
}

/// Fixed layout configuration for one document. Pure configuration; nothing
/// here outlives a generation call.
#[derive(Debug, Clone)]
pub struct Geometry {
    pub page_width: f64,
    pub page_height: f64,
    pub margin: f64,
    /// Height of the year-month label band.
    pub band_year_month: f64,
    /// Height of the weekday/day label band.
    pub band_weekday_day: f64,
    /// Height of the memo band.
    pub band_memo: f64,
    /// Number of memo circles down the left edge of the memo band.
    pub memo_circles: usize,
}

impl Geometry {
    pub fn new(page_size: PageSize, margin: f64) -> Self {
        let (page_width, page_height) = page_size.dimensions();
        Geometry {
            page_width,
            page_height,
            margin,
            band_year_month: 5.0 * MM,
            band_weekday_day: 5.0 * MM,
            band_memo: 15.0 * MM,
            memo_circles: 3,
        }
    }

    /// Width of one day lane.
    pub fn day_width(&self) -> f64 {
        (self.page_width - 2.0 * self.margin) / LANES_PER_PAGE as f64
    }

    /// Height of one day block.
    pub fn day_height(&self) -> f64 {
        self.page_height - 2.0 * self.margin
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Geometry::new(PageSize::A5, 5.0 * MM)
    }
}
