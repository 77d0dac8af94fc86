//! Qforge circuit intermediate representation.
//!
//! This crate provides a cycle-based IR for qudit circuits together with an
//! algebra of differentiable gates. It builds on the value types of
//! [`qforge_qis`].
//!
//! # Core Components
//!
//! - **Gate contract**: [`Unitary`] for shape and parameter count, [`Gate`]
//!   for unitaries, analytic gradients and local optimization
//! - **Gate library**: constant and parameterized primitives in [`gates`]
//! - **Composed gates**: [`FrozenParameterGate`] fixes parameters,
//!   [`VariableLocationGate`] makes placement a continuous parameter
//! - **Circuit**: [`Circuit`] with cycle packing, a global parameter vector
//!   and structural queries (depth, parallelism, coupling graph)
//!
//! # Example: Building a Bell Circuit
//!
//! ```rust
//! use std::sync::Arc;
//! use qforge_ir::gates::{CNOTGate, HGate};
//! use qforge_ir::{Circuit, Unitary};
//!
//! let mut circuit = Circuit::new(2).unwrap();
//! circuit.append_gate(Arc::new(HGate), [0], &[]).unwrap();
//! circuit.append_gate(Arc::new(CNOTGate), [0, 1], &[]).unwrap();
//!
//! assert_eq!(circuit.num_cycles(), 2);
//! assert_eq!(circuit.depth(), 2);
//! assert!(circuit.is_constant());
//! ```
//!
//! # Example: Gradients
//!
//! ```rust
//! use std::sync::Arc;
//! use qforge_ir::gates::U3Gate;
//! use qforge_ir::{Circuit, Unitary};
//!
//! let mut circuit = Circuit::new(1).unwrap();
//! circuit.append_gate(Arc::new(U3Gate), [0], &[0.1, 0.2, 0.3]).unwrap();
//!
//! let grads = circuit.get_grad(circuit.params()).unwrap();
//! assert_eq!(grads.len(), circuit.num_params());
//! ```

pub mod circuit;
pub mod composed;
pub mod config;
pub mod error;
pub mod gate;
pub mod gates;
pub mod location;
pub mod unitary;

pub use circuit::{Circuit, CouplingGraph, Cycle, Operation};
pub use composed::{
    FrozenParameterGate, VariableLocationGate, with_all_frozen_params, with_frozen_params,
};
pub use config::{UnreferencedQuditPolicy, VariableLocationConfig};
pub use error::{ErrorKind, IrError, IrResult};
pub use gate::{DynGateEq, Gate, GateRef, GateSet, Gradient};
pub use location::{CircuitLocation, CircuitPoint, IntoLocation};
pub use unitary::Unitary;

pub use qforge_qis::{QisError, Radixes, StateVector, UnitaryMatrix};
