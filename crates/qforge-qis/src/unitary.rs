//! Validated unitary matrices.

use ndarray::Array2;
use num_complex::Complex64;

use crate::error::{QisError, QisResult};
use crate::math;
use crate::radixes::Radixes;
use crate::state::StateVector;

/// Tolerance used when validating unitaries and state vectors.
pub const DEFAULT_TOLERANCE: f64 = 1e-8;

/// A square complex matrix `U` with `U·U† ≈ I`, tagged with the radixes of
/// the qudits it acts on. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitaryMatrix {
    matrix: Array2<Complex64>,
    radixes: Radixes,
}

impl UnitaryMatrix {
    /// Validates `matrix` against `radixes` with [`DEFAULT_TOLERANCE`].
    pub fn new(matrix: Array2<Complex64>, radixes: Radixes) -> QisResult<Self> {
        Self::with_tolerance(matrix, radixes, DEFAULT_TOLERANCE)
    }

    pub fn with_tolerance(
        matrix: Array2<Complex64>,
        radixes: Radixes,
        tolerance: f64,
    ) -> QisResult<Self> {
        check_shape(&matrix, &radixes)?;
        let deviation = unitary_deviation(&matrix);
        if deviation > tolerance {
            return Err(QisError::NotUnitary {
                deviation,
                tolerance,
            });
        }
        Ok(Self { matrix, radixes })
    }

    /// Builds a unitary from rows, inferring qubit or qutrit radixes.
    pub fn from_rows(rows: Vec<Vec<Complex64>>) -> QisResult<Self> {
        let dim = rows.len();
        if let Some(bad) = rows.iter().find(|r| r.len() != dim) {
            return Err(QisError::NotSquare {
                rows: dim,
                cols: bad.len(),
            });
        }
        let matrix = Array2::from_shape_fn((dim, dim), |(i, j)| rows[i][j]);
        let radixes = Radixes::from_dim(dim)?;
        Self::new(matrix, radixes)
    }

    pub fn identity(radixes: Radixes) -> Self {
        Self {
            matrix: math::identity(radixes.dim()),
            radixes,
        }
    }

    /// Projects an arbitrary square matrix onto the nearest unitary
    /// (polar decomposition `U·Vᴴ` of `M = U·Σ·Vᴴ`).
    pub fn closest_to(matrix: &Array2<Complex64>, radixes: Radixes) -> QisResult<Self> {
        check_shape(matrix, &radixes)?;
        let projected = math::polar_unitary(matrix)?;
        Self::new(projected, radixes)
    }

    /// Returns true if `matrix` is square and unitary within `tolerance`.
    pub fn is_unitary(matrix: &Array2<Complex64>, tolerance: f64) -> bool {
        matrix.is_square() && unitary_deviation(matrix) <= tolerance
    }

    pub fn as_array(&self) -> &Array2<Complex64> {
        &self.matrix
    }

    pub fn into_array(self) -> Array2<Complex64> {
        self.matrix
    }

    pub fn radixes(&self) -> &Radixes {
        &self.radixes
    }

    pub fn dim(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn size(&self) -> usize {
        self.radixes.size()
    }

    /// Conjugate transpose.
    pub fn dagger(&self) -> Self {
        Self {
            matrix: math::dagger(&self.matrix),
            radixes: self.radixes.clone(),
        }
    }

    /// Matrix product `self · other`; both must act on the same radixes.
    pub fn dot(&self, other: &UnitaryMatrix) -> QisResult<Self> {
        if self.radixes != other.radixes {
            return Err(QisError::DimensionMismatch {
                dim: other.dim(),
                expected: self.dim(),
                radixes: self.radixes.to_string(),
            });
        }
        Ok(Self {
            matrix: self.matrix.dot(&other.matrix),
            radixes: self.radixes.clone(),
        })
    }

    /// Tensor product `self ⊗ other`.
    pub fn otimes(&self, other: &UnitaryMatrix) -> Self {
        Self {
            matrix: math::kron(&self.matrix, &other.matrix),
            radixes: self.radixes.concat(&other.radixes),
        }
    }

    /// Hilbert-Schmidt distance `1 - |Tr(U†V)| / d`, insensitive to global phase.
    pub fn get_distance_from(&self, other: &UnitaryMatrix) -> f64 {
        let overlap: Complex64 = self
            .matrix
            .iter()
            .zip(other.matrix.iter())
            .map(|(u, v)| u.conj() * v)
            .sum();
        (1.0 - overlap.norm() / self.dim() as f64).max(0.0)
    }

    /// Applies this unitary to a state on the same radixes.
    pub fn apply(&self, state: &StateVector) -> QisResult<StateVector> {
        if state.radixes() != &self.radixes {
            return Err(QisError::DimensionMismatch {
                dim: state.dim(),
                expected: self.dim(),
                radixes: self.radixes.to_string(),
            });
        }
        StateVector::new(self.matrix.dot(state.as_array()), self.radixes.clone())
    }
}

fn check_shape(matrix: &Array2<Complex64>, radixes: &Radixes) -> QisResult<()> {
    let (rows, cols) = matrix.dim();
    if rows != cols {
        return Err(QisError::NotSquare { rows, cols });
    }
    if rows != radixes.dim() {
        return Err(QisError::DimensionMismatch {
            dim: rows,
            expected: radixes.dim(),
            radixes: radixes.to_string(),
        });
    }
    Ok(())
}

fn unitary_deviation(matrix: &Array2<Complex64>) -> f64 {
    let product = matrix.dot(&math::dagger(matrix));
    math::max_abs_diff(&product, &math::identity(matrix.nrows()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{C_I, C_ONE, C_ZERO};
    use ndarray::array;

    fn pauli_x() -> UnitaryMatrix {
        UnitaryMatrix::new(array![[C_ZERO, C_ONE], [C_ONE, C_ZERO]], Radixes::qubits(1)).unwrap()
    }

    #[test]
    fn test_accepts_unitary() {
        let u = pauli_x();
        assert_eq!(u.dim(), 2);
        assert_eq!(u.size(), 1);
    }

    #[test]
    fn test_rejects_non_unitary() {
        let m = array![[C_ONE, C_ONE], [C_ZERO, C_ONE]];
        assert!(matches!(
            UnitaryMatrix::new(m, Radixes::qubits(1)),
            Err(QisError::NotUnitary { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_shape() {
        let m = Array2::<Complex64>::eye(3);
        assert!(matches!(
            UnitaryMatrix::new(m, Radixes::qubits(1)),
            Err(QisError::DimensionMismatch { dim: 3, expected: 2, .. })
        ));
        let m = Array2::<Complex64>::zeros((2, 3));
        assert!(matches!(
            UnitaryMatrix::new(m, Radixes::qubits(1)),
            Err(QisError::NotSquare { rows: 2, cols: 3 })
        ));
    }

    #[test]
    fn test_from_rows_infers_radixes() {
        let u = UnitaryMatrix::from_rows(vec![vec![C_ONE, C_ZERO], vec![C_ZERO, C_I]]).unwrap();
        assert_eq!(u.radixes(), &Radixes::qubits(1));
    }

    #[test]
    fn test_otimes_and_dot() {
        let x = pauli_x();
        let xx = x.otimes(&x);
        assert_eq!(xx.radixes(), &Radixes::qubits(2));
        let id = xx.dot(&xx).unwrap();
        assert!(id.get_distance_from(&UnitaryMatrix::identity(Radixes::qubits(2))) < 1e-12);
        assert!(x.dot(&xx).is_err());
    }

    #[test]
    fn test_distance_ignores_global_phase() {
        let x = pauli_x();
        let phased = UnitaryMatrix::new(x.as_array().mapv(|v| v * C_I), Radixes::qubits(1)).unwrap();
        assert!(x.get_distance_from(&phased) < 1e-12);
        let id = UnitaryMatrix::identity(Radixes::qubits(1));
        assert!((x.get_distance_from(&id) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_closest_to_projects() {
        let m = array![[C_ONE * 2.0, C_ZERO], [C_ZERO, C_I * 0.5]];
        let u = UnitaryMatrix::closest_to(&m, Radixes::qubits(1)).unwrap();
        let expected = array![[C_ONE, C_ZERO], [C_ZERO, C_I]];
        assert!(math::max_abs_diff(u.as_array(), &expected) < 1e-10);
    }

    #[test]
    fn test_apply() {
        let zero = StateVector::zero(Radixes::qubits(1));
        let one = pauli_x().apply(&zero).unwrap();
        assert_eq!(one.get_probs(), vec![0.0, 1.0]);
    }
}
