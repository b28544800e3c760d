use nalgebra::Point2;

/// Planar arm pose.
///
/// The pose holds the base followed by every joint position, the
/// last point being the effector. A pose is always derived from a
/// link chain and joint angles and is never updated in place.
#[derive(Clone, Debug, PartialEq)]
pub struct Pose {
    points: Vec<Point2<f64>>,
}

impl Pose {
    pub(crate) fn with_capacity(links: usize) -> Self {
        let mut points = Vec::with_capacity(links + 1);
        points.push(Point2::origin());

        Self { points }
    }

    pub(crate) fn push(&mut self, point: Point2<f64>) {
        self.points.push(point);
    }

    /// Number of points, including the base.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// A pose always includes the base.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Base of the arm, always the origin.
    #[inline]
    pub fn base(&self) -> &Point2<f64> {
        &self.points[0]
    }

    /// Arm effector.
    #[inline]
    pub fn effector(&self) -> &Point2<f64> {
        &self.points[self.points.len() - 1]
    }

    /// Joint positions, excluding the base.
    #[inline]
    pub fn joints(&self) -> &[Point2<f64>] {
        &self.points[1..]
    }

    /// All points from base to effector.
    #[inline]
    pub fn points(&self) -> &[Point2<f64>] {
        &self.points
    }

    /// Distance between each pair of successive points.
    pub fn link_lengths(&self) -> impl Iterator<Item = f64> + '_ {
        self.points
            .windows(2)
            .map(|pair| nalgebra::distance(&pair[0], &pair[1]))
    }
}

impl std::fmt::Display for Pose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = String::new();

        for (idx, point) in self.joints().iter().enumerate() {
            s.push_str(&format!("J{}: [{:.3}, {:.3}]; ", idx + 1, point.x, point.y));
        }

        let effector = self.effector();

        write!(f, "{}Effector [{:.3}, {:.3}]", s, effector.x, effector.y)
    }
}
