use std::time::Instant;

use linkage_core::{ForwardKinematics, JointAngles, Pose};

use crate::{
    surface::{Control, Surface},
    trace::{NullTracerInstance, Trace, TraceWriter},
    ArmConfig, Error,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    /// Waiting for input.
    Idle,
    /// Recomputing the pose, only within a dispatch.
    Recomputing,
}

/// Format the status label.
///
/// The label shows the effector position with three decimals followed by
/// every joint angle in degrees with one decimal.
pub fn status_label(pose: &Pose, angles: &JointAngles) -> String {
    let effector = pose.effector();

    let angles = angles
        .degrees()
        .enumerate()
        .map(|(idx, angle)| format!("θ{}={:.1}°", idx + 1, angle))
        .collect::<Vec<_>>()
        .join(", ");

    format!("EE: x={:.3}, y={:.3}\n{}", effector.x, effector.y, angles)
}

/// Interactive arm session.
///
/// The session is the single owner of the joint angles. Every
/// dispatch recomputes the pose from the complete set of angles and
/// forwards the result to the surface, so the order in which controls
/// change never matters.
pub struct Session<S: Surface, T: TraceWriter = NullTracerInstance> {
    solver: ForwardKinematics,
    angles: JointAngles,
    controls: Vec<Control>,
    surface: S,
    tracer: T,
    state: State,
    start: Instant,
}

impl<S: Surface, T: TraceWriter> Session<S, T> {
    /// Construct a new session.
    ///
    /// Fails if the number of initial angles does not match the
    /// number of links, or if the control range, the viewport or any
    /// initial angle is invalid.
    pub fn new(config: &ArmConfig, surface: S, tracer: T) -> Result<Self, Error> {
        let (min, max) = (config.control.min, config.control.max);
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(Error::ControlRange { min, max });
        }

        let extent = config.links.reach() + config.viewport.margin;
        let shift_y = config.viewport.shift_y;
        if !extent.is_finite() || extent <= 0.0 || !shift_y.is_finite() {
            return Err(Error::Viewport { extent, shift_y });
        }

        let initial_angles = config.initial_angles();

        if let Some((joint, angle)) = initial_angles
            .iter()
            .enumerate()
            .find(|(_, angle)| !angle.is_finite())
        {
            return Err(Error::InitialAngle {
                joint,
                angle: *angle,
            });
        }

        if initial_angles.len() != config.links.len() {
            return Err(linkage_core::Error::ArityMismatch {
                links: config.links.len(),
                angles: initial_angles.len(),
            }
            .into());
        }

        let controls: Vec<Control> = initial_angles
            .iter()
            .enumerate()
            .map(|(joint, initial)| Control::new(joint, min, max, *initial))
            .collect();

        let initial = controls.iter().map(|control| control.initial).collect::<Vec<_>>();

        log::debug!("Configured: {}", config);

        Ok(Self {
            solver: ForwardKinematics::new(config.links.clone()),
            angles: JointAngles::from_degrees(&initial),
            controls,
            surface,
            tracer,
            state: State::Idle,
            start: Instant::now(),
        })
    }

    /// Draw the initial pose.
    ///
    /// This dispatches a change without any input so the surface is
    /// never left blank.
    pub fn start(&mut self) -> Result<(), Error> {
        log::debug!("Initial {}", self.angles);

        self.dispatch()
    }

    /// Handle a change of a joint control.
    ///
    /// The value is limited to the control range before it is applied.
    pub fn on_angle_changed(&mut self, joint: usize, degrees: f64) -> Result<(), Error> {
        let control = self
            .controls
            .get(joint)
            .ok_or(Error::UnknownControl(joint))?;

        let value = control.clamp(degrees);
        if value != degrees {
            log::warn!(
                "θ{} clamped from {:.1}° to {:.1}°",
                joint + 1,
                degrees,
                value
            );
        }

        self.angles.set(joint, value.to_radians());

        self.dispatch()
    }

    /// Move a joint control relative to its current value.
    pub fn step(&mut self, joint: usize, delta: f64) -> Result<(), Error> {
        let current = self
            .angles
            .get(joint)
            .ok_or(Error::UnknownControl(joint))?
            .to_degrees();

        self.on_angle_changed(joint, current + delta)
    }

    /// Return every joint control to its initial value.
    pub fn reset(&mut self) -> Result<(), Error> {
        for (joint, control) in self.controls.iter().enumerate() {
            self.angles.set(joint, control.initial.to_radians());
        }

        self.dispatch()
    }

    /// Redraw the current pose.
    pub fn refresh(&mut self) -> Result<(), Error> {
        self.dispatch()
    }

    /// Current pose.
    pub fn pose(&self) -> Result<Pose, Error> {
        Ok(self.solver.solve(&self.angles)?)
    }

    /// Current status label.
    pub fn label(&self) -> Result<String, Error> {
        Ok(status_label(&self.pose()?, &self.angles))
    }

    #[inline]
    pub fn angles(&self) -> &JointAngles {
        &self.angles
    }

    #[inline]
    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    #[inline]
    pub fn state(&self) -> State {
        self.state
    }

    #[inline]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    fn dispatch(&mut self) -> Result<(), Error> {
        self.state = State::Recomputing;
        let result = self.recompute();
        self.state = State::Idle;

        result
    }

    fn recompute(&mut self) -> Result<(), Error> {
        let pose = self.solver.solve(&self.angles)?;
        let label = status_label(&pose, &self.angles);

        log::debug!("{}", pose);
        log::trace!("{}", self.angles);

        pose.record(&mut self.tracer, self.start.elapsed())?;

        let controls = self
            .controls
            .iter()
            .zip(self.angles.degrees())
            .collect::<Vec<_>>();

        self.surface.draw_linkage(pose.points());
        self.surface.set_label(&label);
        self.surface.draw_controls(&controls);
        self.surface.repaint()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use linkage_core::nalgebra::Point2;

    use super::*;

    #[derive(Default)]
    struct RecordingSurface {
        points: Vec<Point2<f64>>,
        label: String,
        controls: Vec<(String, f64)>,
        repaints: usize,
    }

    impl Surface for RecordingSurface {
        fn draw_linkage(&mut self, points: &[Point2<f64>]) {
            self.points = points.to_vec();
        }

        fn set_label(&mut self, text: &str) {
            self.label = text.to_string();
        }

        fn draw_controls(&mut self, controls: &[(&Control, f64)]) {
            self.controls = controls
                .iter()
                .map(|(control, value)| (control.label.clone(), *value))
                .collect();
        }

        fn repaint(&mut self) -> std::io::Result<()> {
            self.repaints += 1;
            Ok(())
        }
    }

    fn session(config: &ArmConfig) -> Session<RecordingSurface> {
        Session::new(config, RecordingSurface::default(), NullTracerInstance).unwrap()
    }

    #[test]
    fn test_start_draws_initial_pose() {
        let mut session = session(&ArmConfig::two_link());
        assert_eq!(session.surface().repaints, 0);

        session.start().unwrap();

        let surface = session.surface();
        assert_eq!(surface.repaints, 1);
        assert_eq!(surface.points.len(), 3);
        assert_eq!(surface.points[0], Point2::origin());
        assert_eq!(surface.label, "EE: x=1.799, y=1.616\nθ1=30.0°, θ2=30.0°");
        assert_eq!(surface.controls.len(), 2);
        assert_eq!(surface.controls[1].0, "θ2 (deg)");
        assert_eq!(session.state(), State::Idle);
    }

    #[test]
    fn test_three_link_label() {
        let mut session = session(&ArmConfig::three_link());
        session.start().unwrap();

        assert_eq!(
            session.surface().label,
            "EE: x=1.799, y=3.116\nθ1=30.0°, θ2=30.0°, θ3=30.0°"
        );
        assert_eq!(session.label().unwrap(), session.surface().label);
    }

    #[test]
    fn test_angle_changed() {
        let mut session = session(&ArmConfig::two_link());
        session.start().unwrap();

        session.on_angle_changed(0, 0.0).unwrap();
        session.on_angle_changed(1, 0.0).unwrap();

        let surface = session.surface();
        assert_eq!(surface.repaints, 3);
        assert!((surface.points[2].x - 2.5).abs() < 1e-9);
        assert!(surface.points[2].y.abs() < 1e-9);
        assert_eq!(surface.label, "EE: x=2.500, y=0.000\nθ1=0.0°, θ2=0.0°");
    }

    #[test]
    fn test_idempotent() {
        let mut session = session(&ArmConfig::three_link());

        session.on_angle_changed(1, -45.0).unwrap();
        let pose = session.pose().unwrap();
        let label = session.surface().label.clone();

        session.on_angle_changed(1, -45.0).unwrap();
        assert_eq!(session.pose().unwrap(), pose);
        assert_eq!(session.surface().label, label);
    }

    #[test]
    fn test_order_independent() {
        let mut lhs = session(&ArmConfig::three_link());
        lhs.on_angle_changed(0, 90.0).unwrap();
        lhs.on_angle_changed(2, -120.0).unwrap();

        let mut rhs = session(&ArmConfig::three_link());
        rhs.on_angle_changed(2, -120.0).unwrap();
        rhs.on_angle_changed(0, 90.0).unwrap();

        assert_eq!(lhs.pose().unwrap(), rhs.pose().unwrap());
        assert_eq!(lhs.surface().label, rhs.surface().label);
    }

    #[test]
    fn test_clamp() {
        let mut session = session(&ArmConfig::two_link());

        session.on_angle_changed(0, 270.0).unwrap();
        assert!((session.angles().get(0).unwrap() - std::f64::consts::PI).abs() < 1e-12);

        session.on_angle_changed(1, -1000.0).unwrap();
        assert!((session.angles().get(1).unwrap() + std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_control() {
        let mut session = session(&ArmConfig::two_link());

        assert!(matches!(
            session.on_angle_changed(2, 10.0),
            Err(Error::UnknownControl(2))
        ));
        assert!(matches!(session.step(5, 1.0), Err(Error::UnknownControl(5))));
        assert_eq!(session.surface().repaints, 0);
    }

    #[test]
    fn test_step_and_reset() {
        let mut session = session(&ArmConfig::two_link());

        session.step(0, 15.0).unwrap();
        assert!((session.angles().get(0).unwrap().to_degrees() - 45.0).abs() < 1e-9);

        session.step(0, 500.0).unwrap();
        assert!((session.angles().get(0).unwrap().to_degrees() - 180.0).abs() < 1e-9);

        session.reset().unwrap();
        let degrees: Vec<f64> = session.angles().degrees().collect();
        assert!((degrees[0] - 30.0).abs() < 1e-9);
        assert!((degrees[1] - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_arity_rejected_on_construction() {
        let mut config = ArmConfig::three_link();
        config.initial_angles = Some(vec![30.0, 30.0]);

        let result = Session::new(&config, RecordingSurface::default(), NullTracerInstance);
        assert!(matches!(
            result,
            Err(Error::Kinematics(linkage_core::Error::ArityMismatch {
                links: 3,
                angles: 2
            }))
        ));
    }

    #[test]
    fn test_control_range_rejected_on_construction() {
        let mut config = ArmConfig::two_link();
        config.control.min = 90.0;
        config.control.max = -90.0;

        let result = Session::new(&config, RecordingSurface::default(), NullTracerInstance);
        assert!(matches!(result, Err(Error::ControlRange { .. })));
    }

    #[test]
    fn test_viewport_rejected_on_construction() {
        let config: ArmConfig =
            toml::from_str("links = [1.5, 1.0]\n[viewport]\nmargin = -2.5").unwrap();

        let canvas = crate::Canvas::new(vec![], &config, 40);
        let result = Session::new(&config, canvas, NullTracerInstance);
        assert!(matches!(result, Err(Error::Viewport { .. })));

        let mut config = ArmConfig::three_link();
        config.viewport.shift_y = f64::INFINITY;

        let result = Session::new(&config, RecordingSurface::default(), NullTracerInstance);
        assert!(matches!(result, Err(Error::Viewport { .. })));
    }

    #[test]
    fn test_initial_angle_rejected_on_construction() {
        let mut config = ArmConfig::two_link();
        config.initial_angle = f64::NAN;

        let result = Session::new(&config, RecordingSurface::default(), NullTracerInstance);
        assert!(matches!(
            result,
            Err(Error::InitialAngle { joint: 0, .. })
        ));

        let mut config = ArmConfig::three_link();
        config.initial_angles = Some(vec![30.0, 30.0, f64::NEG_INFINITY]);

        let result = Session::new(&config, RecordingSurface::default(), NullTracerInstance);
        assert!(matches!(
            result,
            Err(Error::InitialAngle { joint: 2, .. })
        ));
    }

    #[test]
    fn test_surface_by_reference() {
        let mut surface = RecordingSurface::default();

        {
            let mut session =
                Session::new(&ArmConfig::two_link(), &mut surface, NullTracerInstance).unwrap();
            session.start().unwrap();
            session.refresh().unwrap();
        }

        assert_eq!(surface.repaints, 2);
    }
}
