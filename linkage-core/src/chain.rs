use crate::Error;

/// Fixed link lengths of a planar serial arm.
///
/// The chain is validated once on construction and cannot be
/// altered afterwards. Every link must have a positive, finite
/// length and there must be at least one link.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(try_from = "Vec<f64>")]
pub struct LinkChain {
    lengths: Vec<f64>,
}

impl LinkChain {
    /// Construct a new link chain.
    pub fn new(lengths: impl Into<Vec<f64>>) -> Result<Self, Error> {
        let lengths = lengths.into();

        if lengths.is_empty() {
            return Err(Error::EmptyChain);
        }

        for (link, length) in lengths.iter().enumerate() {
            if !length.is_finite() || *length <= 0.0 {
                return Err(Error::InvalidLength {
                    link,
                    length: *length,
                });
            }
        }

        Ok(Self { lengths })
    }

    /// Number of links in the chain.
    #[inline]
    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    /// A validated chain always holds at least one link.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }

    #[inline]
    pub fn lengths(&self) -> &[f64] {
        &self.lengths
    }

    /// Maximum distance the effector can be from the base.
    pub fn reach(&self) -> f64 {
        self.lengths.iter().sum()
    }
}

impl TryFrom<Vec<f64>> for LinkChain {
    type Error = Error;

    fn try_from(value: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl std::fmt::Display for LinkChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lengths = self
            .lengths
            .iter()
            .enumerate()
            .map(|(idx, length)| format!("L{}={:.2}", idx + 1, length))
            .collect::<Vec<_>>()
            .join(" ");

        write!(f, "{}-link chain [{}]", self.len(), lengths)
    }
}

/// Joint angles in radians.
///
/// Each angle is relative to the orientation of the previous link.
/// The first angle is relative to the world X axis.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JointAngles(Vec<f64>);

impl JointAngles {
    /// Construct joint angles from radians.
    pub fn new(angles: impl Into<Vec<f64>>) -> Self {
        Self(angles.into())
    }

    /// Construct `count` joints all set to the same angle.
    pub fn uniform(count: usize, angle: f64) -> Self {
        Self(vec![angle; count])
    }

    /// Construct joint angles from degrees.
    pub fn from_degrees(degrees: &[f64]) -> Self {
        Self(degrees.iter().map(|value| value.to_radians()).collect())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Angle of joint `index` in radians.
    #[inline]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    /// Overwrite the angle of joint `index`.
    ///
    /// Returns the previous angle, or `None` if the joint does not exist.
    pub fn set(&mut self, index: usize, angle: f64) -> Option<f64> {
        self.0
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, angle))
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Iterate the angles in degrees.
    pub fn degrees(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().map(|angle| angle.to_degrees())
    }
}

impl From<Vec<f64>> for JointAngles {
    fn from(value: Vec<f64>) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for JointAngles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let angles = self
            .0
            .iter()
            .enumerate()
            .map(|(idx, angle)| format!("θ{}={:.2}rad {:.1}°", idx + 1, angle, angle.to_degrees()))
            .collect::<Vec<_>>()
            .join("; ");

        write!(f, "{}", angles)
    }
}
