//! Drawing-surface abstraction consumed by the renderer.

/// A stateful 2-D drawing surface. Coordinates are in points with the origin
/// at the bottom-left of the page.
///
/// Style setters apply to subsequent draw calls on the current page. The
/// renderer sets every style it relies on before each drawing group instead
/// of assuming ambient state, so a reused canvas never leaks styles between
/// groups or pages.
pub trait Canvas {
    /// Select the document font at `size` points for subsequent text.
    fn set_font(&mut self, size: f64);

    /// Dash pattern for subsequent strokes. An `off` of zero means solid.
    fn set_dash(&mut self, on: i64, off: i64);

    fn set_line_width(&mut self, width: f64);

    /// Stroke color as RGB components in 0.0..=1.0.
    fn set_stroke_color(&mut self, r: f64, g: f64, b: f64);

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64);

    /// Stroke a rectangle anchored at `(x, y)`; a negative height extends
    /// downward from the anchor.
    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    fn circle(&mut self, cx: f64, cy: f64, radius: f64);

    /// Draw `text` with its baseline starting at `(x, y)`.
    fn text(&mut self, x: f64, y: f64, text: &str);

    /// Finish the current page and start a new one.
    fn show_page(&mut self);
}
