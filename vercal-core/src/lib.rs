//! Core library for vercal: turn recurring weekly schedule rules into a
//! printable weekly-vertical paper calendar.
//!
//! The pipeline is a one-shot batch transform: expand rules into dated
//! occurrences, group them by date, lay the 12-month span out as 4-lane
//! pages, then draw each page onto a [`Canvas`] (the bundled backend writes
//! a PDF). Nothing is shared between generation runs.

pub mod canvas;
pub mod date;
pub mod error;
pub mod expand;
pub mod font;
pub mod geometry;
pub mod grid;
pub mod index;
pub mod pdf;
pub mod render;
pub mod rule;

pub use canvas::Canvas;
pub use date::ClockTime;
pub use error::{VercalError, VercalResult};
pub use expand::{expand, expand_all, Occurrence};
pub use font::Font;
pub use geometry::{Geometry, PageSize, MM};
pub use grid::{build_year_grid, CalendarDay, LANES_PER_PAGE};
pub use index::{DateEventIndex, EventEntry};
pub use pdf::PdfCanvas;
pub use render::{render_document, RenderOptions};
pub use rule::{RecurrenceRule, ScheduleRow};
