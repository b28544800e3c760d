use std::{error, fmt};

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Chain has no links.
    EmptyChain,
    /// Link length is not a positive finite number.
    InvalidLength { link: usize, length: f64 },
    /// Number of joint angles does not match the number of links.
    ArityMismatch { links: usize, angles: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyChain => write!(f, "link chain is empty"),
            Error::InvalidLength { link, length } => {
                write!(f, "link {} has invalid length {}", link + 1, length)
            }
            Error::ArityMismatch { links, angles } => write!(
                f,
                "arity mismatch: {} links but {} joint angles",
                links, angles
            ),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        None
    }
}
