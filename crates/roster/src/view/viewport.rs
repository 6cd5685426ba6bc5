//! Zoom and pan state of the org-chart canvas. Transient, never persisted.

/// Smallest allowed zoom factor.
pub const MIN_SCALE: f64 = 0.3;
/// Largest allowed zoom factor.
pub const MAX_SCALE: f64 = 2.0;
/// Zoom change per step.
pub const SCALE_STEP: f64 = 0.1;

/// Pointer buttons relevant to dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Main (usually left) button. Starts a drag.
    Primary,
    /// Middle button.
    Auxiliary,
    /// Context-menu (usually right) button.
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    /// Pointer position minus offset at press time.
    anchor_x: f64,
    anchor_y: f64,
}

/// Zoom factor, pan offset and in-progress drag.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    scale: f64,
    offset_x: f64,
    offset_y: f64,
    drag: Option<Drag>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            drag: None,
        }
    }
}

impl Viewport {
    /// A viewport at 100% with no pan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current zoom factor.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Current pan offset.
    pub fn offset(&self) -> (f64, f64) {
        (self.offset_x, self.offset_y)
    }

    /// Whether a drag gesture is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Zoom in one step, up to [`MAX_SCALE`].
    pub fn zoom_in(&mut self) {
        self.set_scale(self.scale + SCALE_STEP);
    }

    /// Zoom out one step, down to [`MIN_SCALE`].
    pub fn zoom_out(&mut self) {
        self.set_scale(self.scale - SCALE_STEP);
    }

    /// Restore 100% zoom and clear the pan offset.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Start a drag at `(x, y)`. Only the primary button pans.
    pub fn begin_drag(&mut self, button: PointerButton, x: f64, y: f64) {
        if button != PointerButton::Primary {
            return;
        }
        self.drag = Some(Drag {
            anchor_x: x - self.offset_x,
            anchor_y: y - self.offset_y,
        });
    }

    /// Move the pointer to `(x, y)`. Pans while a drag is active.
    pub fn drag_to(&mut self, x: f64, y: f64) {
        if let Some(drag) = self.drag {
            self.offset_x = x - drag.anchor_x;
            self.offset_y = y - drag.anchor_y;
        }
    }

    /// Release the button.
    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// The pointer left the canvas; same as releasing.
    pub fn pointer_left(&mut self) {
        self.end_drag();
    }

    fn set_scale(&mut self, scale: f64) {
        // Round to one decimal so repeated steps land on exact values.
        let rounded = (scale * 10.0).round() / 10.0;
        self.scale = rounded.clamp(MIN_SCALE, MAX_SCALE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_is_clamped() {
        let mut viewport = Viewport::new();
        for _ in 0..50 {
            viewport.zoom_in();
        }
        assert!((viewport.scale() - MAX_SCALE).abs() < f64::EPSILON);

        for _ in 0..50 {
            viewport.zoom_out();
        }
        assert!((viewport.scale() - MIN_SCALE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zoom_steps_are_exact() {
        let mut viewport = Viewport::new();
        viewport.zoom_in();
        viewport.zoom_in();
        viewport.zoom_in();
        assert!((viewport.scale() - 1.3).abs() < f64::EPSILON);
        viewport.reset();
        assert!((viewport.scale() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_primary_drag_pans() {
        let mut viewport = Viewport::new();
        viewport.begin_drag(PointerButton::Primary, 10.0, 10.0);
        viewport.drag_to(25.0, 5.0);
        assert_eq!(viewport.offset(), (15.0, -5.0));

        viewport.drag_to(30.0, 10.0);
        assert_eq!(viewport.offset(), (20.0, 0.0));

        viewport.end_drag();
        viewport.drag_to(100.0, 100.0);
        assert_eq!(viewport.offset(), (20.0, 0.0));
    }

    #[test]
    fn test_second_drag_continues_from_offset() {
        let mut viewport = Viewport::new();
        viewport.begin_drag(PointerButton::Primary, 0.0, 0.0);
        viewport.drag_to(10.0, 0.0);
        viewport.pointer_left();
        assert!(!viewport.is_dragging());

        viewport.begin_drag(PointerButton::Primary, 50.0, 50.0);
        viewport.drag_to(55.0, 50.0);
        assert_eq!(viewport.offset(), (15.0, 0.0));
    }

    #[test]
    fn test_other_buttons_do_not_drag() {
        let mut viewport = Viewport::new();
        viewport.begin_drag(PointerButton::Secondary, 0.0, 0.0);
        viewport.drag_to(10.0, 10.0);
        assert!(!viewport.is_dragging());
        assert_eq!(viewport.offset(), (0.0, 0.0));
    }
}
