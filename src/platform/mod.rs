//! Platform helpers
//!
//! The game draws into a fixed logical playfield; the canvas element is
//! scaled with CSS to fit the browser window.

use crate::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};

/// Share of the window width the canvas may take
pub const MAX_WIDTH_FRACTION: f32 = 0.95;
/// Share of the window height the canvas may take (room for the title and prompts)
pub const MAX_HEIGHT_FRACTION: f32 = 0.7;

/// Uniform scale that fits the playfield inside the window
pub fn fit_scale(window_width: f32, window_height: f32) -> f32 {
    let max_w = window_width * MAX_WIDTH_FRACTION;
    let max_h = window_height * MAX_HEIGHT_FRACTION;
    (max_w / PLAYFIELD_WIDTH).min(max_h / PLAYFIELD_HEIGHT).max(0.0)
}

/// CSS size (in CSS pixels) for the canvas element
pub fn fit_css_size(window_width: f32, window_height: f32) -> (f32, f32) {
    let scale = fit_scale(window_width, window_height);
    (PLAYFIELD_WIDTH * scale, PLAYFIELD_HEIGHT * scale)
}

/// Apply the fitted size to the canvas style (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn resize_canvas(window: &web_sys::Window, canvas: &web_sys::HtmlCanvasElement) {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(PLAYFIELD_WIDTH as f64) as f32;
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(PLAYFIELD_HEIGHT as f64) as f32;

    let (css_w, css_h) = fit_css_size(width, height);
    let style = canvas.style();
    if style.set_property("width", &format!("{}px", css_w)).is_err()
        || style.set_property("height", &format!("{}px", css_h)).is_err()
    {
        log::warn!("Failed to resize canvas");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_bound_window() {
        // Wide desktop window: height is the limit
        let scale = fit_scale(1920.0, 1000.0);
        assert!((scale - 700.0 / 600.0).abs() < 1e-5);
        let (w, h) = fit_css_size(1920.0, 1000.0);
        assert!((h - 700.0).abs() < 1e-3);
        assert!((w / h - 400.0 / 600.0).abs() < 1e-5);
    }

    #[test]
    fn test_width_bound_window() {
        // Narrow phone: width is the limit
        let scale = fit_scale(360.0, 800.0);
        assert!((scale - 342.0 / 400.0).abs() < 1e-5);
    }

    #[test]
    fn test_degenerate_window() {
        assert_eq!(fit_scale(0.0, 0.0), 0.0);
    }
}
