use std::{error, fmt, io};

#[derive(Debug)]
pub enum Error {
    /// Invalid chain or joint arity.
    Kinematics(linkage_core::Error),
    /// Joint control does not exist.
    UnknownControl(usize),
    /// Joint control range is empty or not finite.
    ControlRange { min: f64, max: f64 },
    /// Plot area is empty or not finite.
    Viewport { extent: f64, shift_y: f64 },
    /// Initial joint angle is not finite.
    InitialAngle { joint: usize, angle: f64 },
    /// Configuration could not be parsed.
    Config(toml::de::Error),
    /// Trace could not be written.
    Trace(csv::Error),
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Kinematics(e) => write!(f, "kinematics: {}", e),
            Error::UnknownControl(joint) => write!(f, "no control for joint θ{}", joint + 1),
            Error::ControlRange { min, max } => {
                write!(f, "invalid control range [{:.1}°, {:.1}°]", min, max)
            }
            Error::Viewport { extent, shift_y } => {
                write!(f, "invalid viewport extent {} shifted by {}", extent, shift_y)
            }
            Error::InitialAngle { joint, angle } => {
                write!(f, "invalid initial angle {} for joint θ{}", angle, joint + 1)
            }
            Error::Config(e) => write!(f, "configuration: {}", e),
            Error::Trace(e) => write!(f, "trace: {}", e),
            Error::Io(e) => write!(f, "{}", e),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Kinematics(e) => Some(e),
            Error::UnknownControl(_)
            | Error::ControlRange { .. }
            | Error::Viewport { .. }
            | Error::InitialAngle { .. } => None,
            Error::Config(e) => Some(e),
            Error::Trace(e) => Some(e),
            Error::Io(e) => Some(e),
        }
    }
}

impl From<linkage_core::Error> for Error {
    fn from(value: linkage_core::Error) -> Self {
        Error::Kinematics(value)
    }
}

impl From<toml::de::Error> for Error {
    fn from(value: toml::de::Error) -> Self {
        Error::Config(value)
    }
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        Error::Trace(value)
    }
}

impl From<io::Error> for Error {
    fn from(value: io::Error) -> Self {
        Error::Io(value)
    }
}
