// Copyright (C) 2024 Laixer Equipment B.V.
// All rights reserved.
//
// This software may be modified and distributed under the terms
// of the included license.  See the LICENSE file for details.

/// The `linkage` library drives an interactive planar arm.
///
/// A [`Session`] owns the link chain and the current joint angles. Every
/// change to a joint angle recomputes the arm pose with the forward kinematics
/// solver from `linkage-core` and forwards it to a rendering [`Surface`]. The
/// library ships a terminal [`Canvas`] surface, a CSV pose tracer and a parser
/// for textual control commands.
pub mod canvas;
pub mod config;
pub mod input;
pub mod session;
pub mod surface;
pub mod trace;

mod error;

pub use linkage_core as core;

pub use self::canvas::Canvas;
pub use self::config::*;
pub use self::error::Error;
pub use self::session::Session;
pub use self::surface::Surface;

/// Linkage runtime module containing various constants.
pub mod consts {
    /// Linkage runtime version.
    ///
    /// # Example
    ///
    /// ```
    /// use linkage::consts::VERSION;
    ///
    /// println!("Linkage runtime version: {}", VERSION);
    /// ```
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// Initial angle of every joint in degrees.
    pub const DEFAULT_INITIAL_ANGLE: f64 = 30.0;

    /// Lower bound of a joint control in degrees.
    pub const DEFAULT_CONTROL_MIN: f64 = -180.0;

    /// Upper bound of a joint control in degrees.
    pub const DEFAULT_CONTROL_MAX: f64 = 180.0;

    /// Space between the arm reach and the edge of the plot.
    pub const DEFAULT_VIEWPORT_MARGIN: f64 = 0.2;

    /// Canvas width in terminal columns.
    ///
    /// The canvas height is derived from the width so the axes keep
    /// an equal aspect ratio.
    pub const DEFAULT_CANVAS_WIDTH: usize = 64;

    /// Narrowest canvas in terminal columns.
    pub const MIN_CANVAS_WIDTH: usize = 16;

    /// Widest canvas in terminal columns.
    pub const MAX_CANVAS_WIDTH: usize = 512;
}

/// Load a configuration from a TOML file.
pub fn from_file<T: serde::de::DeserializeOwned>(
    path: impl AsRef<std::path::Path>,
) -> Result<T, Error> {
    let contents = std::fs::read_to_string(path)?;

    Ok(toml::from_str(&contents)?)
}
