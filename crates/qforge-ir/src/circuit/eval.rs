//! Whole-circuit unitary and gradient.

use ndarray::Array2;
use num_complex::Complex64;
use qforge_qis::{PermutationMatrix, UnitaryMatrix, math};
use tracing::instrument;

use super::Circuit;
use crate::error::IrResult;
use crate::gate::Gradient;
use crate::unitary::Unitary;

/// An operation's unitary (and gradient) embedded into the full register.
struct Embedded {
    utry: Array2<Complex64>,
    grads: Gradient,
}

impl Circuit {
    /// The circuit's unitary at `params`: every operation embedded into the
    /// register and multiplied in time order.
    #[instrument(skip_all, fields(ops = self.num_operations(), dim = self.dim()))]
    pub fn get_unitary(&self, params: &[f64]) -> IrResult<UnitaryMatrix> {
        let total = self
            .embed_all(params, false)?
            .into_iter()
            .fold(math::identity(self.dim()), |acc, e| e.utry.dot(&acc));
        Ok(UnitaryMatrix::new(total, self.radixes().clone())?)
    }

    /// Derivative of the circuit's unitary with respect to every parameter.
    pub fn get_grad(&self, params: &[f64]) -> IrResult<Gradient> {
        Ok(self.get_unitary_and_grad(params)?.1)
    }

    /// Unitary and gradient in one pass, using prefix and suffix products:
    /// `dU/dθ = (E_n ⋯ E_{k+1}) · dE_k/dθ · (E_{k-1} ⋯ E_1)`.
    #[instrument(skip_all, fields(ops = self.num_operations(), dim = self.dim()))]
    pub fn get_unitary_and_grad(&self, params: &[f64]) -> IrResult<(UnitaryMatrix, Gradient)> {
        let embedded = self.embed_all(params, true)?;

        let mut prefixes = Vec::with_capacity(embedded.len());
        let mut prefix = math::identity(self.dim());
        for e in &embedded {
            let next = e.utry.dot(&prefix);
            prefixes.push(prefix);
            prefix = next;
        }

        let mut per_op: Vec<Gradient> = Vec::with_capacity(embedded.len());
        let mut suffix = math::identity(self.dim());
        for (e, before) in embedded.iter().zip(&prefixes).rev() {
            per_op.push(e.grads.iter().map(|d| suffix.dot(d).dot(before)).collect());
            suffix = suffix.dot(&e.utry);
        }
        let grads = per_op.into_iter().rev().flatten().collect();

        Ok((UnitaryMatrix::new(suffix, self.radixes().clone())?, grads))
    }

    fn embed_all(&self, params: &[f64], with_grad: bool) -> IrResult<Vec<Embedded>> {
        self.check_parameters(params)?;
        let mut offset = 0;
        let mut out = Vec::with_capacity(self.num_operations());
        for op in self.operations() {
            let local = &params[offset..offset + op.num_params()];
            offset += op.num_params();
            let perm = PermutationMatrix::from_qudit_location(self.radixes(), op.location().qudits())?;
            let embedded = if with_grad {
                let (utry, grads) = op.gate().get_unitary_and_grad(local)?;
                Embedded {
                    utry: perm.embed(utry.as_array())?,
                    grads: grads
                        .iter()
                        .map(|d| perm.embed(d))
                        .collect::<Result<_, _>>()?,
                }
            } else {
                Embedded {
                    utry: perm.embed(op.gate().get_unitary(local)?.as_array())?,
                    grads: Vec::new(),
                }
            };
            out.push(embedded);
        }
        Ok(out)
    }
}
