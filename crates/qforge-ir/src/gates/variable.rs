//! General variable unitary over an arbitrary register.

use ndarray::Array2;
use num_complex::Complex64;
use qforge_qis::{Radixes, UnitaryMatrix, math};

use crate::error::IrResult;
use crate::gate::Gate;
use crate::unitary::Unitary;

/// A `d x d` gate whose `2d²` parameters are the real parts followed by the
/// imaginary parts of a matrix in row-major order. The gate's unitary is the
/// closest unitary to that matrix.
///
/// Not differentiable; instead it has an exact local optimizer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariableUnitaryGate {
    radixes: Radixes,
}

impl VariableUnitaryGate {
    pub fn new(radixes: Radixes) -> Self {
        Self { radixes }
    }

    /// Parameters encoding `utry` exactly.
    pub fn params_for(utry: &UnitaryMatrix) -> Vec<f64> {
        let m = utry.as_array();
        m.iter().map(|v| v.re).chain(m.iter().map(|v| v.im)).collect()
    }
}

impl Unitary for VariableUnitaryGate {
    fn name(&self) -> String {
        format!("variable{}", self.radixes)
    }

    fn radixes(&self) -> &Radixes {
        &self.radixes
    }

    fn num_params(&self) -> usize {
        2 * self.dim() * self.dim()
    }
}

impl Gate for VariableUnitaryGate {
    fn get_unitary(&self, params: &[f64]) -> IrResult<UnitaryMatrix> {
        self.check_parameters(params)?;
        let dim = self.dim();
        let (real, imag) = params.split_at(dim * dim);
        let m = Array2::from_shape_fn((dim, dim), |(i, j)| {
            Complex64::new(real[i * dim + j], imag[i * dim + j])
        });
        Ok(UnitaryMatrix::closest_to(&m, self.radixes.clone())?)
    }

    /// For `env = W·Σ·Vᴴ` the maximizer of `Re Tr(env·U)` is `U = V·Wᴴ`.
    fn optimize(&self, env: &Array2<Complex64>) -> IrResult<Vec<f64>> {
        self.check_environment(env)?;
        let (w, _, vh) = math::svd(env)?;
        let best = math::dagger(&vh).dot(&math::dagger(&w));
        let utry = UnitaryMatrix::new(best, self.radixes.clone())?;
        Ok(Self::params_for(&utry))
    }
}
