// Magnifier lens geometry, independent of the pan/zoom transform

use super::transform::Size;

/// Where to place the lens and how far to shift its magnified background.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LensFrame {
    pub x: f64,
    pub y: f64,
    pub bg_x: f64,
    pub bg_y: f64,
}

fn clamp_finite(v: f64, lo: f64, hi: f64) -> f64 {
    if v.is_finite() { v.clamp(lo, hi) } else { lo }
}

/// Computes the lens frame for a cursor position given in
/// container-relative coordinates. The lens is centered on the cursor but
/// clamped per axis so it stays fully inside the container; the background
/// moves opposite to the lens, magnified by `factor`.
pub fn lens_frame(cursor_x: f64, cursor_y: f64, container: Size, lens: Size, factor: f64) -> LensFrame {
    // f64::max ignores NaN, so a degenerate container degrades to 0 range.
    let max_x = (container.width - lens.width).max(0.0);
    let max_y = (container.height - lens.height).max(0.0);
    let x = clamp_finite(cursor_x - lens.width / 2.0, 0.0, max_x);
    let y = clamp_finite(cursor_y - lens.height / 2.0, 0.0, max_y);
    LensFrame {
        x,
        y,
        bg_x: -(x * factor),
        bg_y: -(y * factor),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lens_centers_on_cursor() {
        let f = lens_frame(
            200.0,
            150.0,
            Size::new(400.0, 300.0),
            Size::new(100.0, 100.0),
            2.0,
        );
        assert_eq!((f.x, f.y), (150.0, 100.0));
        assert_eq!((f.bg_x, f.bg_y), (-300.0, -200.0));
    }

    #[test]
    fn lens_is_clamped_inside_container() {
        let container = Size::new(400.0, 300.0);
        let lens = Size::new(100.0, 100.0);
        let near_origin = lens_frame(10.0, 10.0, container, lens, 2.0);
        assert_eq!((near_origin.x, near_origin.y), (0.0, 0.0));
        let near_far_corner = lens_frame(395.0, 295.0, container, lens, 2.0);
        assert_eq!((near_far_corner.x, near_far_corner.y), (300.0, 200.0));
    }

    #[test]
    fn oversized_lens_pins_to_origin() {
        let f = lens_frame(
            200.0,
            150.0,
            Size::new(400.0, 300.0),
            Size::new(500.0, 400.0),
            2.0,
        );
        assert_eq!((f.x, f.y), (0.0, 0.0));
        assert_eq!((f.bg_x, f.bg_y), (0.0, 0.0));
    }

    #[test]
    fn non_finite_cursor_degrades_to_origin() {
        let f = lens_frame(
            f64::NAN,
            f64::INFINITY,
            Size::new(400.0, 300.0),
            Size::new(100.0, 100.0),
            2.0,
        );
        assert_eq!((f.x, f.y, f.bg_x, f.bg_y), (0.0, 0.0, 0.0, 0.0));
    }
}
