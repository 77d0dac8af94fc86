//! Validated pure state vectors.

use ndarray::Array1;
use num_complex::Complex64;

use crate::error::{QisError, QisResult};
use crate::radixes::Radixes;
use crate::unitary::DEFAULT_TOLERANCE;

/// A unit-norm complex vector tagged with the radixes of its register.
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    vec: Array1<Complex64>,
    radixes: Radixes,
}

impl StateVector {
    pub fn new(vec: Array1<Complex64>, radixes: Radixes) -> QisResult<Self> {
        Self::with_tolerance(vec, radixes, DEFAULT_TOLERANCE)
    }

    pub fn with_tolerance(
        vec: Array1<Complex64>,
        radixes: Radixes,
        tolerance: f64,
    ) -> QisResult<Self> {
        if vec.len() != radixes.dim() {
            return Err(QisError::DimensionMismatch {
                dim: vec.len(),
                expected: radixes.dim(),
                radixes: radixes.to_string(),
            });
        }
        let norm_sqr = norm_sqr(&vec);
        if (norm_sqr - 1.0).abs() > tolerance {
            return Err(QisError::NotNormalized { norm_sqr });
        }
        Ok(Self { vec, radixes })
    }

    /// Builds a state from raw amplitudes, inferring qubit or qutrit radixes.
    pub fn from_amplitudes(amplitudes: Vec<Complex64>) -> QisResult<Self> {
        let radixes = Radixes::from_dim(amplitudes.len())?;
        Self::new(Array1::from(amplitudes), radixes)
    }

    /// The all-zero computational basis state.
    pub fn zero(radixes: Radixes) -> Self {
        let mut vec = Array1::zeros(radixes.dim());
        vec[0] = Complex64::new(1.0, 0.0);
        Self { vec, radixes }
    }

    /// Returns true if `vec` has unit norm within `tolerance`.
    pub fn is_pure_state(vec: &Array1<Complex64>, tolerance: f64) -> bool {
        !vec.is_empty() && (norm_sqr(vec) - 1.0).abs() <= tolerance
    }

    /// Measurement probabilities of every basis state.
    pub fn get_probs(&self) -> Vec<f64> {
        self.vec.iter().map(|a| a.norm_sqr()).collect()
    }

    pub fn as_array(&self) -> &Array1<Complex64> {
        &self.vec
    }

    pub fn radixes(&self) -> &Radixes {
        &self.radixes
    }

    pub fn dim(&self) -> usize {
        self.vec.len()
    }

    pub fn size(&self) -> usize {
        self.radixes.size()
    }
}

fn norm_sqr(vec: &Array1<Complex64>) -> f64 {
    vec.iter().map(|a| a.norm_sqr()).sum()
}
