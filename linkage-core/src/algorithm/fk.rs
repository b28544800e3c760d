use nalgebra::{Point2, Vector2};

use crate::{Error, JointAngles, LinkChain, Pose};

/// Compute the pose of a planar serial arm.
///
/// Every angle is relative to the previous link, so the orientation
/// of link `i` is the sum of the angles `0..=i`. The returned pose
/// starts at the origin and holds one point per link after that.
pub fn compute_pose(lengths: &[f64], angles: &[f64]) -> Result<Pose, Error> {
    if lengths.is_empty() {
        return Err(Error::EmptyChain);
    }
    if lengths.len() != angles.len() {
        return Err(Error::ArityMismatch {
            links: lengths.len(),
            angles: angles.len(),
        });
    }

    let mut pose = Pose::with_capacity(lengths.len());

    let mut theta = 0.0;
    let mut point = Point2::origin();

    for (length, angle) in lengths.iter().zip(angles) {
        theta += angle;
        point += Vector2::new(length * theta.cos(), length * theta.sin());

        pose.push(point);
    }

    Ok(pose)
}

/// Forward kinematics solver bound to a link chain.
#[derive(Clone, Debug)]
pub struct ForwardKinematics {
    chain: LinkChain,
}

impl ForwardKinematics {
    pub fn new(chain: LinkChain) -> Self {
        Self { chain }
    }

    #[inline]
    pub fn chain(&self) -> &LinkChain {
        &self.chain
    }

    pub fn solve(&self, angles: &JointAngles) -> Result<Pose, Error> {
        compute_pose(self.chain.lengths(), angles.as_slice())
    }

    /// Effector position only.
    pub fn effector(&self, angles: &JointAngles) -> Result<Point2<f64>, Error> {
        self.solve(angles).map(|pose| *pose.effector())
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{PI, TAU};

    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn assert_point(point: &Point2<f64>, x: f64, y: f64, tolerance: f64) {
        assert!(
            (point.x - x).abs() < tolerance && (point.y - y).abs() < tolerance,
            "expected [{}, {}], got [{}, {}]",
            x,
            y,
            point.x,
            point.y
        );
    }

    #[test]
    fn test_pose_length() {
        for links in 1..6 {
            let lengths = vec![0.75; links];
            let angles = vec![0.3; links];

            let pose = compute_pose(&lengths, &angles).unwrap();
            assert_eq!(pose.len(), links + 1);
            assert_eq!(pose.base(), &Point2::origin());
        }
    }

    #[test]
    fn test_link_rigidity() {
        let lengths = [1.5, 1.0, 1.5];
        let angles = [1.2, -2.7, 0.4];

        let pose = compute_pose(&lengths, &angles).unwrap();

        for (expected, actual) in lengths.iter().zip(pose.link_lengths()) {
            assert!((expected - actual).abs() < TOLERANCE);
        }
    }

    #[test]
    fn test_zero_angles() {
        let pose = compute_pose(&[2.0, 3.0], &[0.0, 0.0]).unwrap();

        assert_point(&pose.points()[0], 0.0, 0.0, TOLERANCE);
        assert_point(&pose.points()[1], 2.0, 0.0, TOLERANCE);
        assert_point(&pose.points()[2], 5.0, 0.0, TOLERANCE);
    }

    #[test]
    fn test_two_link() {
        let angles = JointAngles::from_degrees(&[30.0, 30.0]);
        let pose = compute_pose(&[1.5, 1.0], angles.as_slice()).unwrap();

        assert_point(&pose.joints()[0], 1.299, 0.75, 1e-3);
        assert_point(pose.effector(), 1.799, 1.616, 1e-3);
    }

    #[test]
    fn test_three_link() {
        let angles = JointAngles::from_degrees(&[30.0, 30.0, 30.0]);
        let pose = compute_pose(&[1.5, 1.0, 1.5], angles.as_slice()).unwrap();

        assert_point(&pose.joints()[1], 1.799, 1.616, 1e-3);
        assert_point(pose.effector(), 1.799, 3.116, 1e-3);
    }

    #[test]
    fn test_cumulative_angles() {
        // Second link folds back onto the first.
        let pose = compute_pose(&[1.0, 1.0], &[PI / 2.0, PI]).unwrap();

        assert_point(&pose.joints()[0], 0.0, 1.0, TOLERANCE);
        assert_point(pose.effector(), 0.0, 0.0, TOLERANCE);
    }

    #[test]
    fn test_full_rotation() {
        let lengths = [1.5, 1.0, 1.5];
        let angles = [0.4, -1.1, 2.0];

        let pose = compute_pose(&lengths, &angles).unwrap();

        for joint in 0..angles.len() {
            let mut rotated = angles;
            rotated[joint] += TAU;

            let rotated_pose = compute_pose(&lengths, &rotated).unwrap();
            for (lhs, rhs) in pose.points().iter().zip(rotated_pose.points()) {
                assert_point(rhs, lhs.x, lhs.y, TOLERANCE);
            }
        }
    }

    #[test]
    fn test_arity() {
        assert_eq!(
            compute_pose(&[1.5, 1.0], &[0.0]),
            Err(Error::ArityMismatch {
                links: 2,
                angles: 1
            })
        );
        assert_eq!(compute_pose(&[], &[]), Err(Error::EmptyChain));
    }

    #[test]
    fn test_forward_kinematics() {
        let solver = ForwardKinematics::new(LinkChain::new([1.5, 1.0]).unwrap());

        let effector = solver
            .effector(&JointAngles::from_degrees(&[30.0, 30.0]))
            .unwrap();
        assert_point(&effector, 1.799, 1.616, 1e-3);

        assert!(solver.solve(&JointAngles::uniform(3, 0.0)).is_err());
        assert_eq!(solver.chain().len(), 2);
    }

    #[test]
    fn test_solver_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ForwardKinematics>();
        assert_send_sync::<Pose>();
    }
}
