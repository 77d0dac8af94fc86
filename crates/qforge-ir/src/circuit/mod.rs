//! The circuit intermediate representation.
//!
//! A [`Circuit`] is a fixed register of qudits and an ordered list of
//! [`Cycle`]s. Each cycle holds operations on pairwise-disjoint locations,
//! sorted by smallest qudit. The circuit's parameter vector is the
//! concatenation of every operation's parameters in that cycle-major,
//! qudit-major order, and every mutation keeps it in sync.

mod analysis;
mod cycle;
mod eval;
mod operation;

use std::collections::BTreeMap;
use std::sync::Arc;

use qforge_qis::Radixes;
use tracing::debug;

use crate::composed::FrozenParameterGate;
use crate::error::{IrError, IrResult};
use crate::gate::{Gate, GateRef};
use crate::location::{CircuitPoint, IntoLocation};
use crate::unitary::Unitary;

pub use analysis::CouplingGraph;
pub use cycle::Cycle;
pub use operation::Operation;

/// A qudit circuit.
#[derive(Debug, Clone)]
pub struct Circuit {
    radixes: Radixes,
    cycles: Vec<Cycle>,
    params: Vec<f64>,
}

impl Circuit {
    /// An empty circuit on `num_qudits` qubits.
    pub fn new(num_qudits: usize) -> IrResult<Self> {
        if num_qudits == 0 {
            return Err(IrError::EmptyCircuit);
        }
        Ok(Self::from_radixes(Radixes::qubits(num_qudits)))
    }

    /// An empty circuit on `num_qudits` qudits with the given radixes.
    pub fn with_radixes(num_qudits: usize, radixes: impl Into<Vec<usize>>) -> IrResult<Self> {
        let radixes = radixes.into();
        if num_qudits == 0 {
            return Err(IrError::EmptyCircuit);
        }
        if radixes.len() != num_qudits {
            return Err(IrError::RadixCountMismatch {
                expected: num_qudits,
                got: radixes.len(),
            });
        }
        Ok(Self::from_radixes(Radixes::new(radixes)?))
    }

    /// An empty circuit over an already validated register.
    pub fn from_radixes(radixes: Radixes) -> Self {
        Self {
            radixes,
            cycles: Vec::new(),
            params: Vec::new(),
        }
    }

    // =========================================================================
    // Structural mutation
    // =========================================================================

    /// Appends `gate` at `location`, packing it into the cycle right after the
    /// last cycle that touches any of its qudits.
    pub fn append_gate(
        &mut self,
        gate: GateRef,
        location: impl IntoLocation,
        params: &[f64],
    ) -> IrResult<CircuitPoint> {
        let op = self.prepare(gate, location, params)?;
        let cycle = self
            .cycles
            .iter()
            .rposition(|c| !c.is_idle(op.location()))
            .map_or(0, |c| c + 1);
        if cycle == self.cycles.len() {
            self.cycles.push(Cycle::default());
        }
        Ok(self.place(cycle, op))
    }

    /// Inserts `gate` into cycle `cycle_index`. If that cycle is busy at the
    /// location, a new cycle is inserted at `cycle_index` instead; an index
    /// equal to the cycle count appends a new trailing cycle.
    pub fn insert_gate(
        &mut self,
        cycle_index: usize,
        gate: GateRef,
        location: impl IntoLocation,
        params: &[f64],
    ) -> IrResult<CircuitPoint> {
        let op = self.prepare(gate, location, params)?;
        let num_cycles = self.cycles.len();
        if cycle_index > num_cycles {
            return Err(IrError::CycleOutOfRange {
                cycle: cycle_index,
                num_cycles,
            });
        }
        if cycle_index == num_cycles {
            self.cycles.push(Cycle::default());
        } else if !self.cycles[cycle_index].is_idle(op.location()) {
            self.cycles.insert(cycle_index, Cycle::default());
        }
        Ok(self.place(cycle_index, op))
    }

    /// Removes the first operation, in cycle-major then qudit-major order,
    /// whose gate equals `gate`.
    pub fn remove(&mut self, gate: &dyn Gate) -> IrResult<Operation> {
        let point = self
            .find_gate(gate)
            .ok_or_else(|| IrError::GateNotFound { gate: gate.name() })?;
        self.pop(point)
    }

    /// Removes the operation at `point`. A cycle left empty is deleted.
    pub fn pop(&mut self, point: impl Into<CircuitPoint>) -> IrResult<Operation> {
        let point = point.into();
        let index = self.locate(point)?;
        let offset = self.param_offset(point.cycle, index);
        let op = self.cycles[point.cycle].remove(index);
        self.params.drain(offset..offset + op.num_params());
        if self.cycles[point.cycle].is_empty() {
            self.cycles.remove(point.cycle);
        }
        debug!(%point, op = %op, "removed operation");
        Ok(op)
    }

    // =========================================================================
    // Parameters
    // =========================================================================

    /// Fixes global parameter `index` to its current value by wrapping the
    /// owning operation's gate in a [`FrozenParameterGate`].
    pub fn freeze_param(&mut self, index: usize) -> IrResult<()> {
        let (cycle, pos, local) = self.locate_param(index)?;
        let op = &self.cycles[cycle].operations()[pos];
        let mut free = op.params().to_vec();
        let value = free.remove(local);
        let frozen = FrozenParameterGate::new(op.gate().clone(), BTreeMap::from([(local, value)]))?;
        let Some(op) = self.cycles[cycle].get_mut(pos) else {
            return Err(IrError::IntegrityViolation(format!(
                "operation {pos} of cycle {cycle} vanished"
            )));
        };
        op.replace_gate(Arc::new(frozen), free);
        self.params.remove(index);
        debug!(index, value, "froze circuit parameter");
        Ok(())
    }

    /// Overwrites every parameter.
    pub fn set_params(&mut self, params: &[f64]) -> IrResult<()> {
        self.check_parameters(params)?;
        let mut offset = 0;
        for cycle in &mut self.cycles {
            for op in cycle.operations_mut() {
                let n = op.num_params();
                op.params_mut().copy_from_slice(&params[offset..offset + n]);
                offset += n;
            }
        }
        self.params.copy_from_slice(params);
        Ok(())
    }

    /// Overwrites global parameter `index`.
    pub fn set_param(&mut self, index: usize, value: f64) -> IrResult<()> {
        let (cycle, pos, local) = self.locate_param(index)?;
        if let Some(op) = self.cycles[cycle].get_mut(pos) {
            op.params_mut()[local] = value;
        }
        self.params[index] = value;
        Ok(())
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    /// Validates a placement fully before anything is mutated.
    fn prepare(
        &self,
        gate: GateRef,
        location: impl IntoLocation,
        params: &[f64],
    ) -> IrResult<Operation> {
        let op = Operation::new(gate, location.into_location()?, params.to_vec())?;
        self.check_location(&op)?;
        Ok(op)
    }

    fn check_location(&self, op: &Operation) -> IrResult<()> {
        let gate_radixes = op.gate().radixes();
        for (position, (qudit, &expected)) in
            op.location().iter().zip(gate_radixes.iter()).enumerate()
        {
            let Some(&got) = self.radixes.get(qudit) else {
                return Err(IrError::QuditOutOfRange {
                    qudit,
                    size: self.radixes.size(),
                });
            };
            if got != expected {
                return Err(IrError::RadixMismatch {
                    gate: op.gate().name(),
                    position,
                    qudit,
                    expected,
                    got,
                });
            }
        }
        Ok(())
    }

    fn place(&mut self, cycle: usize, op: Operation) -> CircuitPoint {
        let index = self.cycles[cycle].insertion_index(op.location());
        let offset = self.param_offset(cycle, index);
        self.params
            .splice(offset..offset, op.params().iter().copied());
        let point = CircuitPoint::new(cycle, op.location().min_qudit());
        debug!(%point, op = %op, "placed operation");
        self.cycles[cycle].insert(index, op);
        point
    }

    /// Global index of the first parameter of operation `index` in `cycle`.
    fn param_offset(&self, cycle: usize, index: usize) -> usize {
        let before: usize = self.cycles[..cycle].iter().map(Cycle::num_params).sum();
        before + self.cycles[cycle].params_before(index)
    }

    /// Index within its cycle of the operation at `point`.
    fn locate(&self, point: CircuitPoint) -> IrResult<usize> {
        let cycle = self.cycles.get(point.cycle).ok_or(IrError::CycleOutOfRange {
            cycle: point.cycle,
            num_cycles: self.cycles.len(),
        })?;
        cycle.position_of(point.qudit).ok_or(IrError::NoOperationAt {
            cycle: point.cycle,
            qudit: point.qudit,
        })
    }

    /// `(cycle, operation, local index)` owning global parameter `index`.
    fn locate_param(&self, index: usize) -> IrResult<(usize, usize, usize)> {
        if index >= self.params.len() {
            return Err(IrError::ParamIndexOutOfRange {
                index,
                num_params: self.params.len(),
            });
        }
        let mut remaining = index;
        for (c, cycle) in self.cycles.iter().enumerate() {
            for (i, op) in cycle.operations().iter().enumerate() {
                if remaining < op.num_params() {
                    return Ok((c, i, remaining));
                }
                remaining -= op.num_params();
            }
        }
        Err(IrError::IntegrityViolation(format!(
            "parameter {index} is not owned by any operation"
        )))
    }

    fn find_gate(&self, gate: &dyn Gate) -> Option<CircuitPoint> {
        self.cycles.iter().enumerate().find_map(|(c, cycle)| {
            cycle
                .operations()
                .iter()
                .find(|op| op.gate().dyn_eq(gate))
                .map(|op| CircuitPoint::new(c, op.location().min_qudit()))
        })
    }
}

impl Unitary for Circuit {
    fn name(&self) -> String {
        "circuit".into()
    }

    fn radixes(&self) -> &Radixes {
        &self.radixes
    }

    fn num_params(&self) -> usize {
        self.params.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::gates::{CNOTGate, CSUMGate, U3Gate, XGate};

    fn u3() -> GateRef {
        Arc::new(U3Gate)
    }

    #[test]
    fn test_construction() {
        assert!(matches!(Circuit::new(0), Err(IrError::EmptyCircuit)));
        assert!(matches!(
            Circuit::with_radixes(2, vec![2]),
            Err(IrError::RadixCountMismatch { expected: 2, got: 1 })
        ));
        let err = Circuit::with_radixes(2, vec![2, 1]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Construction);
        let c = Circuit::with_radixes(3, vec![2, 3, 2]).unwrap();
        assert_eq!(c.dim(), 12);
        assert!(c.is_constant());
    }

    #[test]
    fn test_append_packs_into_earliest_cycle() {
        let mut c = Circuit::new(3).unwrap();
        let point = |cycle, qudit| CircuitPoint::new(cycle, qudit);
        assert_eq!(c.append_gate(u3(), [0], &[0.0; 3]).unwrap(), point(0, 0));
        assert_eq!(c.append_gate(u3(), [1], &[0.0; 3]).unwrap(), point(0, 1));
        assert_eq!(
            c.append_gate(Arc::new(CNOTGate), [1, 2], &[]).unwrap(),
            point(1, 1)
        );
        assert_eq!(c.append_gate(u3(), [0], &[0.0; 3]).unwrap(), point(1, 0));
        assert_eq!(c.num_cycles(), 2);
    }

    #[test]
    fn test_params_follow_traversal_order() {
        let mut c = Circuit::new(2).unwrap();
        c.append_gate(u3(), [1], &[1.0, 1.0, 1.0]).unwrap();
        c.append_gate(u3(), [0], &[0.0, 0.0, 0.0]).unwrap();
        // qudit 0 sorts first within cycle 0
        assert_eq!(c.params(), &[0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        c.insert_gate(0, u3(), [1], &[2.0, 2.0, 2.0]).unwrap();
        assert_eq!(c.num_cycles(), 2);
        assert_eq!(c.params(), &[2.0, 2.0, 2.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        c.verify_integrity().unwrap();
    }

    #[test]
    fn test_insert_gate_bounds() {
        let mut c = Circuit::new(2).unwrap();
        assert!(matches!(
            c.insert_gate(1, u3(), [0], &[0.0; 3]),
            Err(IrError::CycleOutOfRange { cycle: 1, num_cycles: 0 })
        ));
        c.insert_gate(0, u3(), [0], &[0.0; 3]).unwrap();
        c.insert_gate(0, u3(), [1], &[0.0; 3]).unwrap();
        assert_eq!(c.num_cycles(), 1);
        c.insert_gate(1, u3(), [1], &[0.0; 3]).unwrap();
        assert_eq!(c.num_cycles(), 2);
    }

    #[test]
    fn test_placement_errors_leave_circuit_unchanged() {
        let mut c = Circuit::with_radixes(2, vec![2, 3]).unwrap();
        c.append_gate(u3(), [0], &[0.1, 0.2, 0.3]).unwrap();
        let err = c.append_gate(u3(), [1], &[0.0; 3]).unwrap_err();
        assert!(matches!(err, IrError::RadixMismatch { qudit: 1, expected: 2, got: 3, .. }));
        assert!(matches!(
            c.append_gate(u3(), [2], &[0.0; 3]),
            Err(IrError::QuditOutOfRange { qudit: 2, size: 2 })
        ));
        assert!(matches!(
            c.append_gate(u3(), [0], &[0.0; 2]),
            Err(IrError::ParameterMismatch { .. })
        ));
        assert!(matches!(
            c.append_gate(Arc::new(CSUMGate), [0, 1], &[]),
            Err(IrError::RadixMismatch { .. })
        ));
        assert_eq!(c.num_operations(), 1);
        assert_eq!(c.params(), &[0.1, 0.2, 0.3]);
        c.verify_integrity().unwrap();
    }

    #[test]
    fn test_pop_and_remove() {
        let mut c = Circuit::new(2).unwrap();
        c.append_gate(u3(), [0], &[0.1, 0.2, 0.3]).unwrap();
        c.append_gate(Arc::new(CNOTGate), [0, 1], &[]).unwrap();
        c.append_gate(u3(), [1], &[0.4, 0.5, 0.6]).unwrap();
        assert!(matches!(c.pop((0, 1)), Err(IrError::NoOperationAt { .. })));
        assert!(matches!(c.pop((5, 0)), Err(IrError::CycleOutOfRange { .. })));

        let op = c.pop((1, 1)).unwrap();
        assert_eq!(op.gate().name(), "cx");
        assert_eq!(c.num_cycles(), 2);

        let op = c.remove(&U3Gate).unwrap();
        assert_eq!(op.params(), &[0.1, 0.2, 0.3]);
        assert_eq!(c.params(), &[0.4, 0.5, 0.6]);
        assert!(matches!(c.remove(&XGate), Err(IrError::GateNotFound { .. })));
        c.verify_integrity().unwrap();
    }

    #[test]
    fn test_freeze_param() {
        let mut c = Circuit::new(1).unwrap();
        c.append_gate(u3(), [0], &[0.1, 0.2, 0.3]).unwrap();
        let before = c.get_unitary(c.params()).unwrap();
        c.freeze_param(1).unwrap();
        assert_eq!(c.num_params(), 2);
        assert_eq!(c.params(), &[0.1, 0.3]);
        let after = c.get_unitary(c.params()).unwrap();
        assert_eq!(before, after);
        assert!(matches!(
            c.freeze_param(2),
            Err(IrError::ParamIndexOutOfRange { index: 2, num_params: 2 })
        ));
        c.verify_integrity().unwrap();
    }

    #[test]
    fn test_set_params() {
        let mut c = Circuit::new(2).unwrap();
        c.append_gate(u3(), [0], &[0.0; 3]).unwrap();
        c.append_gate(u3(), [1], &[0.0; 3]).unwrap();
        c.set_params(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(c.get_operation((0, 1)).unwrap().params(), &[4.0, 5.0, 6.0]);
        c.set_param(0, -1.0).unwrap();
        assert_eq!(c.get_operation((0, 0)).unwrap().params(), &[-1.0, 2.0, 3.0]);
        assert!(c.set_params(&[0.0]).is_err());
        assert!(c.set_param(6, 0.0).is_err());
        c.verify_integrity().unwrap();
    }
}
