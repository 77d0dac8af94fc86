//! Per-qudit radix tuples.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::error::{QisError, QisResult};

/// The radix (local dimension) of every qudit in a register.
///
/// Every entry is at least 2. The dimension of the register is the product
/// of the entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Radixes(Vec<usize>);

impl Radixes {
    /// Validates and wraps a radix tuple.
    pub fn new(radixes: impl Into<Vec<usize>>) -> QisResult<Self> {
        let radixes = radixes.into();
        if radixes.is_empty() {
            return Err(QisError::EmptyRadixes);
        }
        if let Some((index, &radix)) = radixes.iter().enumerate().find(|(_, r)| **r < 2) {
            return Err(QisError::InvalidRadix { index, radix });
        }
        Ok(Self(radixes))
    }

    /// `n` qubits.
    pub fn qubits(n: usize) -> Self {
        Self(vec![2; n])
    }

    /// `n` qutrits.
    pub fn qutrits(n: usize) -> Self {
        Self(vec![3; n])
    }

    /// Infers radixes from a dimension: a power of two is read as qubits,
    /// a power of three as qutrits. Anything else is ambiguous.
    pub fn from_dim(dim: usize) -> QisResult<Self> {
        if dim >= 2 {
            if let Some(n) = exact_log(dim, 2) {
                return Ok(Self::qubits(n));
            }
            if let Some(n) = exact_log(dim, 3) {
                return Ok(Self::qutrits(n));
            }
        }
        Err(QisError::UnknownRadixes(dim))
    }

    /// Number of qudits.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Product of all radixes.
    pub fn dim(&self) -> usize {
        self.0.iter().product()
    }

    pub fn is_qubit_only(&self) -> bool {
        self.0.iter().all(|&r| r == 2)
    }

    pub fn is_qutrit_only(&self) -> bool {
        self.0.iter().all(|&r| r == 3)
    }

    /// Radixes of the qudits at `location`, in location order.
    pub fn select(&self, location: &[usize]) -> QisResult<Self> {
        let mut selected = Vec::with_capacity(location.len());
        for &q in location {
            let radix = self.0.get(q).copied().ok_or_else(|| QisError::InvalidLocation {
                location: location.to_vec(),
                size: self.size(),
                reason: "qudit index out of range",
            })?;
            selected.push(radix);
        }
        Self::new(selected)
    }

    /// Concatenates two radix tuples.
    pub fn concat(&self, other: &Radixes) -> Self {
        let mut joined = self.0.clone();
        joined.extend_from_slice(&other.0);
        Self(joined)
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

fn exact_log(mut dim: usize, base: usize) -> Option<usize> {
    let mut n = 0;
    while dim > 1 {
        if dim % base != 0 {
            return None;
        }
        dim /= base;
        n += 1;
    }
    Some(n)
}

impl Deref for Radixes {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.0
    }
}

impl TryFrom<Vec<usize>> for Radixes {
    type Error = QisError;

    fn try_from(radixes: Vec<usize>) -> QisResult<Self> {
        Self::new(radixes)
    }
}

impl From<Radixes> for Vec<usize> {
    fn from(radixes: Radixes) -> Self {
        radixes.0
    }
}

impl fmt::Display for Radixes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}
