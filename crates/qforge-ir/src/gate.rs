//! The gate contract and gate identity.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use ndarray::Array2;
use num_complex::Complex64;
use qforge_qis::UnitaryMatrix;

use crate::error::{IrError, IrResult};
use crate::unitary::Unitary;

/// One derivative matrix per parameter, in parameter order.
pub type Gradient = Vec<Array2<Complex64>>;

/// Shared handle to a gate. Gates are immutable values, so one instance can
/// be placed many times and shared across threads.
pub type GateRef = Arc<dyn Gate>;

/// A quantum gate: a parameterized unitary with optional analytic gradient
/// and optional closed-form local optimizer.
///
/// Implementors provide [`get_unitary`](Gate::get_unitary); differentiable
/// gates override [`get_grad`](Gate::get_grad) and
/// [`is_differentiable`](Gate::is_differentiable).
pub trait Gate: Unitary + DynGateEq + fmt::Debug + Send + Sync {
    /// Whether [`get_grad`](Gate::get_grad) is available.
    fn is_differentiable(&self) -> bool {
        false
    }

    /// The unitary at `params`.
    fn get_unitary(&self, params: &[f64]) -> IrResult<UnitaryMatrix>;

    /// The derivative of the unitary with respect to each parameter.
    fn get_grad(&self, params: &[f64]) -> IrResult<Gradient> {
        self.check_parameters(params)?;
        Err(IrError::NotDifferentiable { gate: self.name() })
    }

    /// Unitary and gradient together, for gates that share work between them.
    fn get_unitary_and_grad(&self, params: &[f64]) -> IrResult<(UnitaryMatrix, Gradient)> {
        Ok((self.get_unitary(params)?, self.get_grad(params)?))
    }

    /// Parameters maximizing `Re Tr(env · U(params))`.
    fn optimize(&self, env: &Array2<Complex64>) -> IrResult<Vec<f64>> {
        self.check_environment(env)?;
        if self.is_constant() {
            return Ok(Vec::new());
        }
        Err(IrError::NotOptimizable { gate: self.name() })
    }

    /// Fails unless `env` is a `dim x dim` matrix.
    fn check_environment(&self, env: &Array2<Complex64>) -> IrResult<()> {
        let (rows, cols) = env.dim();
        if rows != self.dim() || cols != self.dim() {
            return Err(IrError::EnvironmentMismatch {
                gate: self.name(),
                rows,
                cols,
                dim: self.dim(),
            });
        }
        Ok(())
    }
}

/// Value equality through `dyn Gate`: equal iff same concrete type and equal
/// by that type's `PartialEq`.
pub trait DynGateEq {
    fn as_any(&self) -> &dyn Any;
    fn dyn_eq(&self, other: &dyn Gate) -> bool;
}

impl<T: Gate + PartialEq + 'static> DynGateEq for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn Gate) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }
}

impl PartialEq for dyn Gate {
    fn eq(&self, other: &Self) -> bool {
        self.dyn_eq(other)
    }
}

/// A set of distinct gates, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct GateSet {
    gates: Vec<GateRef>,
}

impl GateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `gate` unless an equal gate is present; returns whether it was added.
    pub fn insert(&mut self, gate: GateRef) -> bool {
        if self.contains(gate.as_ref()) {
            return false;
        }
        self.gates.push(gate);
        true
    }

    pub fn contains(&self, gate: &dyn Gate) -> bool {
        self.gates.iter().any(|g| g.dyn_eq(gate))
    }

    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GateRef> {
        self.gates.iter()
    }
}

impl FromIterator<GateRef> for GateSet {
    fn from_iter<I: IntoIterator<Item = GateRef>>(iter: I) -> Self {
        let mut set = GateSet::new();
        for gate in iter {
            set.insert(gate);
        }
        set
    }
}

impl<'a> IntoIterator for &'a GateSet {
    type Item = &'a GateRef;
    type IntoIter = std::slice::Iter<'a, GateRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.gates.iter()
    }
}
