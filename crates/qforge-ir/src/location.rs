//! Qudit locations and circuit coordinates.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};

/// An ordered, duplicate-free, non-empty tuple of qudit indices a gate is
/// applied to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct CircuitLocation(Vec<usize>);

impl CircuitLocation {
    pub fn new(qudits: impl Into<Vec<usize>>) -> IrResult<Self> {
        let qudits = qudits.into();
        if qudits.is_empty() {
            return Err(IrError::EmptyLocation);
        }
        for (i, q) in qudits.iter().enumerate() {
            if qudits[..i].contains(q) {
                return Err(IrError::DuplicateQudit { qudit: *q });
            }
        }
        Ok(Self(qudits))
    }

    pub fn qudits(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    pub fn contains(&self, qudit: usize) -> bool {
        self.0.contains(&qudit)
    }

    /// Smallest qudit index; orders operations inside a cycle.
    pub fn min_qudit(&self) -> usize {
        self.0.iter().copied().min().unwrap_or(0)
    }

    pub fn max_qudit(&self) -> usize {
        self.0.iter().copied().max().unwrap_or(0)
    }

    pub fn overlaps(&self, other: &CircuitLocation) -> bool {
        self.0.iter().any(|q| other.contains(*q))
    }

    /// Every unordered pair of qudits, as `(min, max)`.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0.iter().enumerate().flat_map(move |(i, &a)| {
            self.0[i + 1..].iter().map(move |&b| (a.min(b), a.max(b)))
        })
    }
}

impl TryFrom<Vec<usize>> for CircuitLocation {
    type Error = IrError;

    fn try_from(qudits: Vec<usize>) -> IrResult<Self> {
        Self::new(qudits)
    }
}

impl From<CircuitLocation> for Vec<usize> {
    fn from(location: CircuitLocation) -> Self {
        location.0
    }
}

impl fmt::Display for CircuitLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// Anything that can be validated into a [`CircuitLocation`].
pub trait IntoLocation {
    fn into_location(self) -> IrResult<CircuitLocation>;
}

impl IntoLocation for CircuitLocation {
    fn into_location(self) -> IrResult<CircuitLocation> {
        Ok(self)
    }
}

impl IntoLocation for &CircuitLocation {
    fn into_location(self) -> IrResult<CircuitLocation> {
        Ok(self.clone())
    }
}

impl IntoLocation for Vec<usize> {
    fn into_location(self) -> IrResult<CircuitLocation> {
        CircuitLocation::new(self)
    }
}

impl IntoLocation for &[usize] {
    fn into_location(self) -> IrResult<CircuitLocation> {
        CircuitLocation::new(self)
    }
}

impl<const N: usize> IntoLocation for [usize; N] {
    fn into_location(self) -> IrResult<CircuitLocation> {
        CircuitLocation::new(self)
    }
}

impl<const N: usize> IntoLocation for &[usize; N] {
    fn into_location(self) -> IrResult<CircuitLocation> {
        CircuitLocation::new(*self)
    }
}

/// The `(cycle, qudit)` coordinate of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CircuitPoint {
    pub cycle: usize,
    pub qudit: usize,
}

impl CircuitPoint {
    pub fn new(cycle: usize, qudit: usize) -> Self {
        Self { cycle, qudit }
    }
}

impl From<(usize, usize)> for CircuitPoint {
    fn from((cycle, qudit): (usize, usize)) -> Self {
        Self { cycle, qudit }
    }
}

impl fmt::Display for CircuitPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.cycle, self.qudit)
    }
}
