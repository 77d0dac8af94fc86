//! Qudit permutation matrices used to embed local operators into a register.

use ndarray::Array2;
use num_complex::Complex64;

use crate::error::{QisError, QisResult};
use crate::math;
use crate::radixes::Radixes;

/// The 0/1 matrix `P` such that `P · (G ⊗ I) · Pᵀ` applies a local operator
/// `G` to the qudits of a location inside a larger register.
///
/// The reordered register lists the location's qudits first, in location
/// order, followed by the remaining qudits in ascending order. Basis indices
/// are big-endian: qudit 0 is the most significant digit.
#[derive(Debug, Clone, PartialEq)]
pub struct PermutationMatrix {
    matrix: Array2<Complex64>,
    order: Vec<usize>,
    local_dim: usize,
}

impl PermutationMatrix {
    pub fn from_qudit_location(radixes: &Radixes, location: &[usize]) -> QisResult<Self> {
        let size = radixes.size();
        let invalid = |reason| QisError::InvalidLocation {
            location: location.to_vec(),
            size,
            reason,
        };
        if location.is_empty() {
            return Err(invalid("location is empty"));
        }
        let mut seen = vec![false; size];
        for &q in location {
            match seen.get_mut(q) {
                None => return Err(invalid("qudit index out of range")),
                Some(true) => return Err(invalid("duplicate qudit")),
                Some(flag) => *flag = true,
            }
        }

        let mut order = location.to_vec();
        order.extend((0..size).filter(|q| !seen[*q]));
        let reordered: Vec<usize> = order.iter().map(|&q| radixes[q]).collect();
        let local_dim = reordered[..location.len()].iter().product();

        let dim = radixes.dim();
        let mut matrix = Array2::zeros((dim, dim));
        let mut digits = vec![0usize; size];
        for index in 0..dim {
            let mut rest = index;
            for q in (0..size).rev() {
                digits[q] = rest % radixes[q];
                rest /= radixes[q];
            }
            let permuted = order
                .iter()
                .zip(&reordered)
                .fold(0, |acc, (&q, &r)| acc * r + digits[q]);
            matrix[[index, permuted]] = math::C_ONE;
        }

        Ok(Self {
            matrix,
            order,
            local_dim,
        })
    }

    pub fn as_array(&self) -> &Array2<Complex64> {
        &self.matrix
    }

    /// Register qudits in the order of the reordered basis.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Dimension of the subspace the location spans.
    pub fn local_dim(&self) -> usize {
        self.local_dim
    }

    pub fn dim(&self) -> usize {
        self.matrix.nrows()
    }

    /// Dimension of the identity padding the local operator.
    pub fn pad_dim(&self) -> usize {
        self.dim() / self.local_dim
    }

    /// Embeds a local operator of dimension [`local_dim`](Self::local_dim)
    /// into the full register: `P · (local ⊗ I_pad) · Pᵀ`.
    pub fn embed(&self, local: &Array2<Complex64>) -> QisResult<Array2<Complex64>> {
        if local.dim() != (self.local_dim, self.local_dim) {
            return Err(QisError::DimensionMismatch {
                dim: local.nrows(),
                expected: self.local_dim,
                radixes: format!("{:?}", &self.order[..]),
            });
        }
        let padded = math::kron(local, &math::identity(self.pad_dim()));
        Ok(self.matrix.dot(&padded).dot(&self.matrix.t()))
    }
}
