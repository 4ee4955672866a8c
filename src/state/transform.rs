// Pan/zoom transform state for one widget instance

/// Rendered width/height of the container or image, read once at init.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Current offset and scale of the image, plus the per-widget step and
/// floor the zoom operations clamp against. Invariant: `scale` never goes
/// below `scale_min`, construction included.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    pub offset_x: f64,
    pub offset_y: f64,
    pub scale: f64,
    scale_step: f64,
    scale_min: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(1.0, 0.12, 0.12)
    }
}

impl Transform {
    pub fn new(initial_scale: f64, scale_step: f64, scale_min: f64) -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            scale: initial_scale.max(scale_min),
            scale_step,
            scale_min,
        }
    }

    /// Centers the image inside the container. Scale is untouched.
    /// Degenerate geometry resolves to the origin instead of NaN offsets.
    pub fn center_in(&mut self, container: Size, image: Size) {
        let x = (container.width - image.width) / 2.0;
        let y = (container.height - image.height) / 2.0;
        if x.is_finite() && y.is_finite() {
            self.offset_x = x;
            self.offset_y = y;
        } else {
            self.offset_x = 0.0;
            self.offset_y = 0.0;
        }
    }

    /// One zoom step. Stepping out below the floor is a silent no-op.
    pub fn zoom(&mut self, direction: ZoomDirection) {
        match direction {
            ZoomDirection::In => self.scale += self.scale_step,
            ZoomDirection::Out => {
                if self.scale - self.scale_step >= self.scale_min {
                    self.scale -= self.scale_step;
                }
            }
        }
    }

    /// Direct overwrite used by gesture commit. Offsets are deliberately
    /// unclamped (the image may be dragged out of view; only the session
    /// bounds check limits dragging). Non-finite input is dropped.
    pub fn set_offset(&mut self, x: f64, y: f64) {
        if x.is_finite() && y.is_finite() {
            self.offset_x = x;
            self.offset_y = y;
        }
    }

    /// CSS transform written to the image element's style.
    pub fn css(&self) -> String {
        format!(
            "translate3d({}px, {}px, 0) scale3d({}, {}, 1)",
            self.offset_x, self.offset_y, self.scale, self.scale
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn centers_image_in_container() {
        let mut t = Transform::default();
        t.center_in(Size::new(400.0, 300.0), Size::new(200.0, 100.0));
        assert_eq!((t.offset_x, t.offset_y), (100.0, 100.0));
    }

    #[test]
    fn center_leaves_scale_alone() {
        let mut t = Transform::new(1.5, 0.12, 0.12);
        t.center_in(Size::new(400.0, 300.0), Size::new(200.0, 100.0));
        assert_eq!(t.scale, 1.5);
    }

    #[test]
    fn degenerate_geometry_centers_to_origin() {
        let mut t = Transform::default();
        t.set_offset(40.0, 50.0);
        t.center_in(Size::new(f64::NAN, 300.0), Size::new(200.0, 100.0));
        assert_eq!((t.offset_x, t.offset_y), (0.0, 0.0));
    }

    #[test]
    fn scale_never_drops_below_floor() {
        let mut t = Transform::default();
        for _ in 0..100 {
            t.zoom(ZoomDirection::Out);
            assert!(t.scale >= 0.12);
        }
    }

    #[test]
    fn zoom_out_at_floor_is_noop() {
        let mut t = Transform::new(0.12, 0.12, 0.12);
        t.zoom(ZoomDirection::Out);
        assert_eq!(t.scale, 0.12);
    }

    #[test]
    fn zoom_in_then_out_round_trips() {
        let mut t = Transform::default();
        for _ in 0..5 {
            t.zoom(ZoomDirection::In);
        }
        for _ in 0..5 {
            t.zoom(ZoomDirection::Out);
        }
        assert!(approx(t.scale, 1.0));
    }

    #[test]
    fn initial_scale_is_clamped_to_floor() {
        let t = Transform::new(0.05, 0.12, 0.12);
        assert_eq!(t.scale, 0.12);
    }

    #[test]
    fn non_finite_offset_is_dropped() {
        let mut t = Transform::default();
        t.set_offset(12.0, 34.0);
        t.set_offset(f64::NAN, 0.0);
        t.set_offset(0.0, f64::INFINITY);
        assert_eq!((t.offset_x, t.offset_y), (12.0, 34.0));
    }

    #[test]
    fn css_combines_translation_and_scale() {
        let mut t = Transform::new(2.0, 0.12, 0.12);
        t.set_offset(10.5, -4.0);
        assert_eq!(t.css(), "translate3d(10.5px, -4px, 0) scale3d(2, 2, 1)");
    }
}
