use linkage_core::nalgebra::Point2;

/// Joint control.
///
/// A control represents a bounded input for a single joint, much
/// like a slider. All values are in degrees.
#[derive(Clone, Debug, PartialEq)]
pub struct Control {
    /// Control label.
    pub label: String,
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
    /// Initial value.
    pub initial: f64,
}

impl Control {
    pub fn new(joint: usize, min: f64, max: f64, initial: f64) -> Self {
        Self {
            label: format!("θ{} (deg)", joint + 1),
            min,
            max,
            initial: initial.clamp(min, max),
        }
    }

    /// Limit a value to the control range.
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// Rendering surface.
///
/// The surface draws the arm as a polyline from the base through every
/// joint to the effector, shows a status label and the joint controls.
/// Nothing becomes visible until `repaint` is called.
pub trait Surface {
    /// Replace the drawn linkage.
    fn draw_linkage(&mut self, points: &[Point2<f64>]);

    /// Replace the status label.
    fn set_label(&mut self, text: &str);

    /// Replace the control readouts. Each control is paired with its
    /// current value in degrees.
    fn draw_controls(&mut self, _controls: &[(&Control, f64)]) {}

    /// Present the current state.
    fn repaint(&mut self) -> std::io::Result<()>;
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn draw_linkage(&mut self, points: &[Point2<f64>]) {
        (**self).draw_linkage(points)
    }

    fn set_label(&mut self, text: &str) {
        (**self).set_label(text)
    }

    fn draw_controls(&mut self, controls: &[(&Control, f64)]) {
        (**self).draw_controls(controls)
    }

    fn repaint(&mut self) -> std::io::Result<()> {
        (**self).repaint()
    }
}
