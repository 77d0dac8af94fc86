//! Read-only circuit queries.

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use rustc_hash::{FxHashMap, FxHashSet};

use super::{Circuit, Cycle, Operation};
use crate::error::{IrError, IrResult};
use crate::gate::GateSet;
use crate::location::CircuitPoint;
use crate::unitary::Unitary;

/// Unordered qudit pairs `(min, max)` that share at least one operation.
pub type CouplingGraph = FxHashSet<(usize, usize)>;

impl Circuit {
    pub fn cycles(&self) -> &[Cycle] {
        &self.cycles
    }

    /// The parameter vector. Callers that need to modify it take a copy.
    pub fn params(&self) -> &[f64] {
        &self.params
    }

    /// An owned copy of the parameter vector.
    pub fn get_params(&self) -> Vec<f64> {
        self.params.clone()
    }

    pub fn num_cycles(&self) -> usize {
        self.cycles.len()
    }

    pub fn num_operations(&self) -> usize {
        self.cycles.iter().map(Cycle::len).sum()
    }

    /// Operations in cycle-major, qudit-major order.
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.cycles.iter().flat_map(|c| c.operations().iter())
    }

    /// Operations in traversal order, paired with their cycle index.
    pub fn operations_with_cycles(&self) -> impl Iterator<Item = (usize, &Operation)> {
        self.cycles
            .iter()
            .enumerate()
            .flat_map(|(i, c)| c.operations().iter().map(move |op| (i, op)))
    }

    pub fn get_operation(&self, point: impl Into<CircuitPoint>) -> IrResult<&Operation> {
        let point = point.into();
        let index = self.locate(point)?;
        Ok(&self.cycles[point.cycle].operations()[index])
    }

    /// True if every gate in the circuit is differentiable.
    pub fn is_differentiable(&self) -> bool {
        self.operations().all(|op| op.gate().is_differentiable())
    }

    /// Dependency graph of the operations: an edge `a -> b` labelled with a
    /// qudit means `b` is the next operation on that qudit after `a`.
    pub fn dependency_graph(&self) -> DiGraph<CircuitPoint, usize> {
        let n = self.num_operations();
        let mut graph = DiGraph::with_capacity(n, 2 * n);
        let mut frontier: Vec<Option<NodeIndex>> = vec![None; self.size()];
        for (cycle, op) in self.operations_with_cycles() {
            let node = graph.add_node(CircuitPoint::new(cycle, op.location().min_qudit()));
            for qudit in op.location().iter() {
                if let Some(prev) = frontier[qudit] {
                    graph.add_edge(prev, node, qudit);
                }
                frontier[qudit] = Some(node);
            }
        }
        graph
    }

    /// Length of the longest chain of dependent operations.
    pub fn depth(&self) -> usize {
        let graph = self.dependency_graph();
        let mut depths: FxHashMap<NodeIndex, usize> =
            FxHashMap::with_capacity_and_hasher(graph.node_count(), Default::default());
        let mut max_depth = 0usize;

        // Nodes are added in traversal order, which is already topological.
        for node in graph.node_indices() {
            let node_depth = graph
                .edges_directed(node, Direction::Incoming)
                .map(|e| depths.get(&e.source()).copied().unwrap_or(0))
                .max()
                .unwrap_or(0)
                + 1;
            max_depth = max_depth.max(node_depth);
            depths.insert(node, node_depth);
        }

        max_depth
    }

    /// Average number of qudits acted on per layer of depth.
    pub fn parallelism(&self) -> f64 {
        let depth = self.depth();
        if depth == 0 {
            return 0.0;
        }
        let qudit_ops: usize = self.operations().map(Operation::size).sum();
        qudit_ops as f64 / depth as f64
    }

    pub fn coupling_graph(&self) -> CouplingGraph {
        self.operations()
            .flat_map(|op| op.location().pairs())
            .collect()
    }

    /// Distinct gates in the circuit.
    pub fn gate_set(&self) -> GateSet {
        self.operations().map(|op| op.gate().clone()).collect()
    }

    /// Re-derives every structural invariant from scratch.
    pub fn verify_integrity(&self) -> IrResult<()> {
        let mut expected_params = Vec::with_capacity(self.params.len());

        for (c, cycle) in self.cycles.iter().enumerate() {
            if cycle.is_empty() {
                return Err(IrError::IntegrityViolation(format!("cycle {c} is empty")));
            }
            let ops = cycle.operations();
            for (i, op) in ops.iter().enumerate() {
                if op.location().len() != op.gate().size() {
                    return Err(IrError::IntegrityViolation(format!(
                        "operation {op} in cycle {c} has a location of the wrong size"
                    )));
                }
                if op.num_params() != op.gate().num_params() {
                    return Err(IrError::IntegrityViolation(format!(
                        "operation {op} in cycle {c} has {} parameters, its gate takes {}",
                        op.num_params(),
                        op.gate().num_params()
                    )));
                }
                self.check_location(op)
                    .map_err(|e| IrError::IntegrityViolation(format!("cycle {c}: {e}")))?;
                if let Some(prev) = i.checked_sub(1).map(|p| &ops[p]) {
                    if prev.location().min_qudit() > op.location().min_qudit() {
                        return Err(IrError::IntegrityViolation(format!(
                            "cycle {c} is not in qudit order"
                        )));
                    }
                }
                if ops[..i].iter().any(|other| other.location().overlaps(op.location())) {
                    return Err(IrError::IntegrityViolation(format!(
                        "cycle {c} has overlapping operations at {}",
                        op.location()
                    )));
                }
                expected_params.extend_from_slice(op.params());
            }
        }

        if expected_params != self.params {
            return Err(IrError::IntegrityViolation(
                "parameter vector is out of sync with operations".into(),
            ));
        }
        Ok(())
    }
}
