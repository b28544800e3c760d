// Copyright (C) 2024 Laixer Equipment B.V.
// All rights reserved.
//
// This software may be modified and distributed under the terms
// of the included license.  See the LICENSE file for details.

//! Planar serial arm kinematics.
//!
//! A planar arm is described by a [`LinkChain`] of fixed link lengths and a
//! parallel set of [`JointAngles`]. The forward kinematics solver maps both
//! onto a [`Pose`]: the position of the base, every joint and the effector.

pub mod algorithm;
pub mod chain;
pub mod pose;

mod error;

pub use nalgebra;

pub use self::algorithm::fk::{compute_pose, ForwardKinematics};
pub use self::chain::{JointAngles, LinkChain};
pub use self::error::Error;
pub use self::pose::Pose;
