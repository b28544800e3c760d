use std::path::PathBuf;

use linkage_core::LinkChain;

use crate::consts::*;

/// Built-in arm presets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Preset {
    /// Two link planar arm.
    TwoLink,
    /// Three link planar arm.
    ThreeLink,
}

impl Preset {
    pub fn config(&self) -> ArmConfig {
        match self {
            Preset::TwoLink => ArmConfig::two_link(),
            Preset::ThreeLink => ArmConfig::three_link(),
        }
    }
}

/// Joint control range in degrees.
#[derive(Copy, Clone, Debug, serde_derive::Deserialize, PartialEq)]
pub struct ControlConfig {
    #[serde(default = "default_control_min")]
    pub min: f64,
    #[serde(default = "default_control_max")]
    pub max: f64,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            min: DEFAULT_CONTROL_MIN,
            max: DEFAULT_CONTROL_MAX,
        }
    }
}

/// Plot area around the arm.
#[derive(Copy, Clone, Debug, serde_derive::Deserialize, PartialEq)]
pub struct ViewportConfig {
    /// Space between the arm reach and the plot edge.
    #[serde(default = "default_viewport_margin")]
    pub margin: f64,
    /// Vertical shift of the plot.
    #[serde(default)]
    pub shift_y: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            margin: DEFAULT_VIEWPORT_MARGIN,
            shift_y: 0.0,
        }
    }
}

/// Planar arm configuration.
#[derive(Clone, Debug, serde_derive::Deserialize, PartialEq)]
pub struct ArmConfig {
    /// Plot title.
    #[serde(default)]
    pub title: Option<String>,
    /// Link lengths.
    pub links: LinkChain,
    /// Initial angle of every joint in degrees.
    #[serde(default = "default_initial_angle")]
    pub initial_angle: f64,
    /// Initial angle per joint in degrees, overrides `initial_angle`.
    #[serde(default)]
    pub initial_angles: Option<Vec<f64>>,
    /// Joint control range.
    #[serde(default)]
    pub control: ControlConfig,
    /// Plot area.
    #[serde(default)]
    pub viewport: ViewportConfig,
}

impl ArmConfig {
    fn with_links(lengths: &[f64]) -> Self {
        Self {
            title: None,
            links: LinkChain::new(lengths).expect("preset link chain is valid"),
            initial_angle: DEFAULT_INITIAL_ANGLE,
            initial_angles: None,
            control: ControlConfig::default(),
            viewport: ViewportConfig::default(),
        }
    }

    /// Two link arm with links of 1.5 and 1.0.
    pub fn two_link() -> Self {
        Self::with_links(&[1.5, 1.0])
    }

    /// Three link arm with links of 1.5, 1.0 and 1.5.
    ///
    /// The plot is shifted up by half a unit.
    pub fn three_link() -> Self {
        let mut config = Self::with_links(&[1.5, 1.0, 1.5]);
        config.viewport.shift_y = 0.5;
        config
    }

    /// Plot title.
    pub fn title(&self) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| format!("{}-Link Planar Arm", self.links.len()))
    }

    /// Initial joint angles in degrees.
    pub fn initial_angles(&self) -> Vec<f64> {
        self.initial_angles
            .clone()
            .unwrap_or_else(|| vec![self.initial_angle; self.links.len()])
    }
}

impl std::fmt::Display for ArmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}; {}; Control: [{:.1}°, {:.1}°]",
            self.title(),
            self.links,
            self.control.min,
            self.control.max
        )
    }
}

/// Linkage global configuration.
#[derive(Clone, Debug)]
pub struct GlobalConfig {
    /// Name of the binary.
    pub bin_name: String,
    /// Whether terminal output is colored.
    pub color: bool,
    /// Canvas width in terminal columns.
    pub canvas_width: usize,
    /// Directory to record pose traces in.
    pub trace: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            bin_name: String::new(),
            color: true,
            canvas_width: DEFAULT_CANVAS_WIDTH,
            trace: None,
        }
    }
}

fn default_control_min() -> f64 {
    DEFAULT_CONTROL_MIN
}

fn default_control_max() -> f64 {
    DEFAULT_CONTROL_MAX
}

fn default_viewport_margin() -> f64 {
    DEFAULT_VIEWPORT_MARGIN
}

fn default_initial_angle() -> f64 {
    DEFAULT_INITIAL_ANGLE
}
