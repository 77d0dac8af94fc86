//! Shape contract shared by gates and circuits.

use qforge_qis::Radixes;

use crate::error::{IrError, IrResult};

/// Anything that denotes a (possibly parameterized) unitary over a fixed
/// register.
pub trait Unitary {
    /// Human-readable name used in error messages.
    fn name(&self) -> String;

    /// Radixes of the qudits this unitary acts on.
    fn radixes(&self) -> &Radixes;

    /// Number of real parameters.
    fn num_params(&self) -> usize;

    /// Number of qudits.
    fn size(&self) -> usize {
        self.radixes().size()
    }

    /// Matrix dimension, the product of the radixes.
    fn dim(&self) -> usize {
        self.radixes().dim()
    }

    fn is_qubit_only(&self) -> bool {
        self.radixes().is_qubit_only()
    }

    fn is_qutrit_only(&self) -> bool {
        self.radixes().is_qutrit_only()
    }

    fn is_parameterized(&self) -> bool {
        self.num_params() != 0
    }

    fn is_constant(&self) -> bool {
        self.num_params() == 0
    }

    /// Fails unless `params` has exactly [`num_params`](Self::num_params) entries.
    fn check_parameters(&self, params: &[f64]) -> IrResult<()> {
        if params.len() != self.num_params() {
            return Err(IrError::ParameterMismatch {
                name: self.name(),
                expected: self.num_params(),
                got: params.len(),
            });
        }
        Ok(())
    }
}
