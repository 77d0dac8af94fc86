//! A time step of a circuit.

use crate::location::CircuitLocation;

use super::operation::Operation;

/// Operations that run in the same time step. Locations are pairwise
/// disjoint and operations are kept sorted by their smallest qudit.
#[derive(Debug, Clone, Default)]
pub struct Cycle {
    ops: Vec<Operation>,
}

impl Cycle {
    pub fn operations(&self) -> &[Operation] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// True if no operation touches any qudit of `location`.
    pub fn is_idle(&self, location: &CircuitLocation) -> bool {
        !self.ops.iter().any(|op| op.location().overlaps(location))
    }

    /// Index of the operation touching `qudit`.
    pub fn position_of(&self, qudit: usize) -> Option<usize> {
        self.ops.iter().position(|op| op.location().contains(qudit))
    }

    pub fn num_params(&self) -> usize {
        self.ops.iter().map(Operation::num_params).sum()
    }

    /// Where an operation on `location` belongs in qudit-major order.
    pub(crate) fn insertion_index(&self, location: &CircuitLocation) -> usize {
        let key = location.min_qudit();
        self.ops.partition_point(|op| op.location().min_qudit() < key)
    }

    /// Number of parameters held by operations before `index`.
    pub(crate) fn params_before(&self, index: usize) -> usize {
        self.ops[..index].iter().map(Operation::num_params).sum()
    }

    pub(crate) fn insert(&mut self, index: usize, op: Operation) {
        self.ops.insert(index, op);
    }

    pub(crate) fn remove(&mut self, index: usize) -> Operation {
        self.ops.remove(index)
    }

    pub(crate) fn operations_mut(&mut self) -> impl Iterator<Item = &mut Operation> {
        self.ops.iter_mut()
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Operation> {
        self.ops.get_mut(index)
    }
}
