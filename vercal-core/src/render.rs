//! Page rendering: day blocks, memo bands, hour rulings, and event boxes.
//!
//! All vertical positions are computed top-down from the block's top edge
//! using linear interpolation across the hour band; the canvas origin is a
//! surface detail the math never depends on.

use chrono::Datelike;

use crate::canvas::Canvas;
use crate::date::weekday_abbr;
use crate::error::{VercalError, VercalResult};
use crate::geometry::{Geometry, MM};
use crate::grid::{pages, CalendarDay, LANES_PER_PAGE};
use crate::index::{DateEventIndex, EventEntry};

/// Right edge of a day block stops 1 mm short of the neighboring lane.
const LANE_INSET: f64 = MM;

/// Rendering options beyond the fixed page geometry.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// First hour of the visible daily time range.
    pub hour_start: u32,
    /// Last hour of the visible daily time range.
    pub hour_end: u32,
    pub font_size: f64,
    /// Outline every day block (debug aid).
    pub draw_day_box: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            hour_start: 6,
            hour_end: 24,
            font_size: 12.0,
            draw_day_box: false,
        }
    }
}

impl RenderOptions {
    fn visible_hours(&self) -> u32 {
        self.hour_end - self.hour_start
    }

    fn hour_font_size(&self) -> f64 {
        self.font_size * 0.7
    }
}

/// Geometry of one day lane, derived once per block.
struct Frame {
    left: f64,
    right: f64,
    top: f64,
    width: f64,
    height: f64,
    /// Top edge of the hour band.
    top_hour: f64,
    /// Height of the hour band.
    hour_band: f64,
}

impl Frame {
    fn new(geometry: &Geometry, lane: usize) -> Self {
        let width = geometry.day_width();
        let height = geometry.day_height();
        let left = geometry.margin + width * lane as f64;
        let top = geometry.margin + height;
        let top_hour =
            top - (geometry.band_year_month + geometry.band_weekday_day + geometry.band_memo);
        Frame {
            left,
            right: left + width - LANE_INSET,
            top,
            width,
            height,
            top_hour,
            hour_band: top_hour - (top - height),
        }
    }

    fn one_hour(&self, options: &RenderOptions) -> f64 {
        self.hour_band / f64::from(options.visible_hours())
    }
}

/// Render the whole document: one page per 4-lane block, in ascending page
/// order, with a page break after each.
pub fn render_document(
    grid: &[CalendarDay],
    events: &DateEventIndex,
    geometry: &Geometry,
    options: &RenderOptions,
    canvas: &mut dyn Canvas,
) -> VercalResult<()> {
    if options.hour_start >= options.hour_end || options.hour_end > 24 {
        return Err(VercalError::InvalidHourRange {
            start: options.hour_start,
            end: options.hour_end,
        });
    }
    for page in pages(grid) {
        for day in page {
            draw_day_block(canvas, day, events, geometry, options);
        }
        // Lanes with no assigned date still get their stationery.
        for lane in 0..LANES_PER_PAGE {
            if !page.iter().any(|day| day.position == lane) {
                draw_empty_block(canvas, geometry, options, lane);
            }
        }
        canvas.show_page();
    }
    Ok(())
}

fn draw_day_block(
    canvas: &mut dyn Canvas,
    day: &CalendarDay,
    events: &DateEventIndex,
    geometry: &Geometry,
    options: &RenderOptions,
) {
    let frame = Frame::new(geometry, day.position);

    if options.draw_day_box {
        canvas.set_dash(1, 0);
        canvas.set_line_width(0.3);
        canvas.rect(frame.left, frame.top - frame.height, frame.width, frame.height);
    }

    draw_date_header(canvas, day, geometry, options, &frame);
    draw_memo_band(canvas, geometry, &frame);
    draw_ten_minute_ticks(canvas, options, &frame);
    draw_hour_band(canvas, options, &frame, true);

    for event in events.events_on(day.date) {
        draw_event(canvas, event, options, &frame);
    }
}

/// Memo band and hour ruling only: the padding lane at the start or end of a
/// fiscal-year span. No header, no ticks, no hour numbers.
fn draw_empty_block(
    canvas: &mut dyn Canvas,
    geometry: &Geometry,
    options: &RenderOptions,
    lane: usize,
) {
    let frame = Frame::new(geometry, lane);
    draw_memo_band(canvas, geometry, &frame);
    draw_hour_band(canvas, options, &frame, false);
}

fn draw_date_header(
    canvas: &mut dyn Canvas,
    day: &CalendarDay,
    geometry: &Geometry,
    options: &RenderOptions,
    frame: &Frame,
) {
    canvas.set_font(options.font_size);
    if day.is_month_boundary {
        canvas.text(
            frame.left,
            frame.top - options.font_size,
            &format!("{}-{:02}", day.date.year(), day.date.month()),
        );
    }
    canvas.text(
        frame.left,
        frame.top - geometry.band_weekday_day - options.font_size,
        &format!("{:02} {}", day.date.day(), weekday_abbr(day.weekday)),
    );
}

/// Two solid rules bounding the memo band, plus evenly spaced circles for
/// note-taking down its left edge.
fn draw_memo_band(canvas: &mut dyn Canvas, geometry: &Geometry, frame: &Frame) {
    let spacing = geometry.band_memo / geometry.memo_circles as f64;
    let top_line = frame.top - (geometry.band_year_month + geometry.band_weekday_day);
    let bottom_line = top_line - geometry.band_memo;
    let first_circle = top_line - spacing * 0.5;

    canvas.set_dash(1, 0);
    canvas.set_line_width(0.8);
    canvas.line(frame.left, top_line, frame.right, top_line);
    canvas.line(frame.left, bottom_line, frame.right, bottom_line);
    for i in 0..geometry.memo_circles {
        canvas.circle(
            frame.left + spacing * 0.5,
            first_circle - spacing * i as f64,
            spacing / 3.0,
        );
    }
}

/// Small circles at every 10-minute subdivision of the hour band, in two
/// alternating sizes, stroked green.
fn draw_ten_minute_ticks(canvas: &mut dyn Canvas, options: &RenderOptions, frame: &Frame) {
    let tick = frame.one_hour(options) / 6.0;
    let x = frame.left + (frame.right - frame.left) * 0.12;

    canvas.set_dash(1, 0);
    canvas.set_line_width(1.0);
    canvas.set_stroke_color(0.0, 0.7, 0.3);
    for i in 0..options.visible_hours() as usize * 6 {
        let y = frame.top_hour - tick * i as f64;
        let radius = ((i % 2) as f64 + 1.0) * 0.5;
        canvas.circle(x, y, radius);
    }
    canvas.set_stroke_color(0.0, 0.0, 0.0);
}

/// Dashed rules at every whole hour; hour numbers unless suppressed.
fn draw_hour_band(
    canvas: &mut dyn Canvas,
    options: &RenderOptions,
    frame: &Frame,
    draw_numbers: bool,
) {
    let one_hour = frame.one_hour(options);

    canvas.set_dash(3, 2);
    canvas.set_line_width(0.5);
    if draw_numbers {
        canvas.set_font(options.hour_font_size());
        for i in 0..options.visible_hours() {
            canvas.text(
                frame.left,
                frame.top_hour - one_hour * f64::from(i) - options.hour_font_size(),
                &format!("{:02}", options.hour_start + i),
            );
        }
    }
    for i in 1..=options.visible_hours() {
        let y = frame.top_hour - one_hour * f64::from(i);
        canvas.line(frame.left, y, frame.right, y);
    }
}

/// One event box, placed by time-of-day. An event without an end time gets a
/// single rule at its start position instead of a box.
fn draw_event(
    canvas: &mut dyn Canvas,
    event: &EventEntry,
    options: &RenderOptions,
    frame: &Frame,
) {
    let one_hour = frame.one_hour(options);
    let y = frame.top_hour
        - (event.event_start.to_hours() - f64::from(options.hour_start)) * one_hour;

    canvas.set_dash(1, 0);
    canvas.set_line_width(0.5);
    match event.event_end {
        Some(end) => {
            let duration = -(end.to_hours() - event.event_start.to_hours()) * one_hour;
            canvas.rect(frame.left + frame.width * 0.12, y, frame.width * 0.83, duration);
        }
        None => {
            canvas.line(
                frame.left + frame.width * 0.12,
                y,
                frame.left + frame.width * 0.95,
                y,
            );
        }
    }
    canvas.set_font(options.hour_font_size());
    canvas.text(
        frame.left + frame.width * 0.13,
        y - options.hour_font_size(),
        &event.event,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expand::Occurrence;
    use crate::grid::build_year_grid;
    use chrono::{NaiveDate, Weekday};

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Font(f64),
        Dash(i64, i64),
        Width(f64),
        Color(f64, f64, f64),
        Line(f64, f64, f64, f64),
        Rect(f64, f64, f64, f64),
        Circle(f64, f64, f64),
        Text(f64, f64, String),
        Page,
    }

    #[derive(Default)]
    struct MockCanvas {
        ops: Vec<Op>,
    }

    impl Canvas for MockCanvas {
        fn set_font(&mut self, size: f64) {
            self.ops.push(Op::Font(size));
        }
        fn set_dash(&mut self, on: i64, off: i64) {
            self.ops.push(Op::Dash(on, off));
        }
        fn set_line_width(&mut self, width: f64) {
            self.ops.push(Op::Width(width));
        }
        fn set_stroke_color(&mut self, r: f64, g: f64, b: f64) {
            self.ops.push(Op::Color(r, g, b));
        }
        fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
            self.ops.push(Op::Line(x1, y1, x2, y2));
        }
        fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
            self.ops.push(Op::Rect(x, y, width, height));
        }
        fn circle(&mut self, cx: f64, cy: f64, radius: f64) {
            self.ops.push(Op::Circle(cx, cy, radius));
        }
        fn text(&mut self, x: f64, y: f64, text: &str) {
            self.ops.push(Op::Text(x, y, text.to_string()));
        }
        fn show_page(&mut self) {
            self.ops.push(Op::Page);
        }
    }

    fn single_day_grid(date: &str, position: usize, is_month_boundary: bool) -> Vec<CalendarDay> {
        let date: NaiveDate = date.parse().unwrap();
        vec![CalendarDay {
            date,
            weekday: date.weekday(),
            position,
            page: 1,
            is_month_boundary,
        }]
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn one_page_break_per_page() {
        let grid = build_year_grid(2025, true, true, true).unwrap();
        let last_page = grid.last().unwrap().page;
        let mut canvas = MockCanvas::default();
        render_document(
            &grid,
            &DateEventIndex::new(),
            &Geometry::default(),
            &RenderOptions::default(),
            &mut canvas,
        )
        .unwrap();
        let breaks = canvas.ops.iter().filter(|op| matches!(op, Op::Page)).count();
        assert_eq!(breaks as u32, last_page);
    }

    #[test]
    fn empty_hour_range_is_rejected_not_divided_by() {
        let grid = single_day_grid("2025-04-16", 0, false);
        let options = RenderOptions {
            hour_start: 9,
            hour_end: 9,
            ..RenderOptions::default()
        };
        let mut canvas = MockCanvas::default();
        let result = render_document(
            &grid,
            &DateEventIndex::new(),
            &Geometry::default(),
            &options,
            &mut canvas,
        );
        assert!(matches!(
            result,
            Err(VercalError::InvalidHourRange { start: 9, end: 9 })
        ));
        assert!(canvas.ops.is_empty(), "nothing may be drawn for a bad range");
    }

    #[test]
    fn day_block_draws_headers_and_hour_numbers() {
        // 2025-04-16 is a Wednesday; not a month boundary here.
        let grid = single_day_grid("2025-04-16", 2, false);
        let mut canvas = MockCanvas::default();
        render_document(
            &grid,
            &DateEventIndex::new(),
            &Geometry::default(),
            &RenderOptions::default(),
            &mut canvas,
        )
        .unwrap();

        let texts: Vec<&String> = canvas
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Text(_, _, s) => Some(s),
                _ => None,
            })
            .collect();
        // Day header plus one number per visible hour (6..24), no year-month.
        assert_eq!(texts.len(), 1 + 18);
        assert_eq!(texts[0], "16 wed");
        assert_eq!(texts[1], "06");
        assert_eq!(texts[18], "23");
        assert!(!texts.iter().any(|t| t.as_str() == "2025-04"));
    }

    #[test]
    fn month_boundary_adds_year_month_header() {
        let grid = single_day_grid("2025-04-01", 1, true);
        let mut canvas = MockCanvas::default();
        render_document(
            &grid,
            &DateEventIndex::new(),
            &Geometry::default(),
            &RenderOptions::default(),
            &mut canvas,
        )
        .unwrap();
        assert!(canvas
            .ops
            .iter()
            .any(|op| matches!(op, Op::Text(_, _, s) if s == "2025-04")));
    }

    #[test]
    fn empty_lanes_get_ruling_but_no_text_or_ticks() {
        // One occupied lane leaves three empty ones. Empty blocks contribute
        // lines and memo circles only.
        let grid = single_day_grid("2025-04-16", 0, false);
        let geometry = Geometry::default();
        let options = RenderOptions::default();
        let mut canvas = MockCanvas::default();
        render_document(&grid, &DateEventIndex::new(), &geometry, &options, &mut canvas).unwrap();

        let texts = canvas
            .ops
            .iter()
            .filter(|op| matches!(op, Op::Text(..)))
            .count();
        assert_eq!(texts, 1 + 18, "empty lanes must not add text");

        // Ticks (green circles) appear once: 6 per hour for the one real day.
        let green_circles = canvas
            .ops
            .iter()
            .filter(|op| matches!(op, Op::Circle(_, _, r) if *r <= 1.0))
            .count();
        assert_eq!(green_circles, 18 * 6);

        // Hour lines: 18 per lane across all four lanes; memo rules: 2 each.
        let lines = canvas.ops.iter().filter(|op| matches!(op, Op::Line(..))).count();
        assert_eq!(lines, 4 * (18 + 2));
    }

    #[test]
    fn event_rect_is_placed_by_time_of_day() {
        let date = "2025-04-16";
        let grid = single_day_grid(date, 0, false);
        let geometry = Geometry::default();
        let options = RenderOptions::default();
        let occurrence = Occurrence {
            date: date.parse().unwrap(),
            weekday: Weekday::Wed,
            event_start: "10:30".parse().unwrap(),
            event_end: Some("12:00".parse().unwrap()),
            label: "math".to_string(),
        };
        let events = DateEventIndex::from_occurrences(&[occurrence]);

        let mut canvas = MockCanvas::default();
        render_document(&grid, &events, &geometry, &options, &mut canvas).unwrap();

        let frame = Frame::new(&geometry, 0);
        let one_hour = frame.one_hour(&options);
        let expected_y = frame.top_hour - (10.5 - 6.0) * one_hour;
        let expected_h = -1.5 * one_hour;

        let rect = canvas
            .ops
            .iter()
            .find_map(|op| match op {
                Op::Rect(x, y, w, h) => Some((*x, *y, *w, *h)),
                _ => None,
            })
            .expect("event rectangle");
        assert!(close(rect.0, frame.left + frame.width * 0.12));
        assert!(close(rect.1, expected_y));
        assert!(close(rect.2, frame.width * 0.83));
        assert!(close(rect.3, expected_h));

        assert!(canvas
            .ops
            .iter()
            .any(|op| matches!(op, Op::Text(_, _, s) if s == "math")));
    }

    #[test]
    fn open_ended_event_gets_marker_not_rect() {
        let date = "2025-04-16";
        let grid = single_day_grid(date, 0, false);
        let occurrence = Occurrence {
            date: date.parse().unwrap(),
            weekday: Weekday::Wed,
            event_start: "12:30".parse().unwrap(),
            event_end: None,
            label: "english".to_string(),
        };
        let events = DateEventIndex::from_occurrences(&[occurrence]);

        let mut canvas = MockCanvas::default();
        let geometry = Geometry::default();
        let options = RenderOptions::default();
        render_document(&grid, &events, &geometry, &options, &mut canvas).unwrap();

        assert!(!canvas.ops.iter().any(|op| matches!(op, Op::Rect(..))));

        let frame = Frame::new(&geometry, 0);
        let expected_y = frame.top_hour - (12.5 - 6.0) * frame.one_hour(&options);
        assert!(canvas.ops.iter().any(
            |op| matches!(op, Op::Line(x, y, _, _) if close(*y, expected_y) && close(*x, frame.left + frame.width * 0.12))
        ));
        assert!(canvas
            .ops
            .iter()
            .any(|op| matches!(op, Op::Text(_, _, s) if s == "english")));
    }

    #[test]
    fn day_box_outline_is_off_by_default_and_togglable() {
        let grid = single_day_grid("2025-04-16", 0, false);
        let geometry = Geometry::default();
        let mut options = RenderOptions::default();

        let mut canvas = MockCanvas::default();
        render_document(&grid, &DateEventIndex::new(), &geometry, &options, &mut canvas).unwrap();
        assert!(!canvas.ops.iter().any(|op| matches!(op, Op::Rect(..))));

        options.draw_day_box = true;
        let mut canvas = MockCanvas::default();
        render_document(&grid, &DateEventIndex::new(), &geometry, &options, &mut canvas).unwrap();
        assert!(canvas.ops.iter().any(|op| matches!(op, Op::Rect(..))));
    }

    #[test]
    fn tick_color_is_reset_after_each_day_block() {
        let grid = single_day_grid("2025-04-16", 0, false);
        let mut canvas = MockCanvas::default();
        render_document(
            &grid,
            &DateEventIndex::new(),
            &Geometry::default(),
            &RenderOptions::default(),
            &mut canvas,
        )
        .unwrap();
        let colors: Vec<&Op> = canvas
            .ops
            .iter()
            .filter(|op| matches!(op, Op::Color(..)))
            .collect();
        assert_eq!(colors.len(), 2);
        assert_eq!(*colors.last().unwrap(), &Op::Color(0.0, 0.0, 0.0));
    }
}
