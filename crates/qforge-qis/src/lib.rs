//! Value types for qudit circuits.
//!
//! This crate holds the immutable, eagerly validated building blocks the
//! circuit IR computes with:
//!
//! - [`Radixes`]: per-qudit local dimensions
//! - [`UnitaryMatrix`]: a unitary tagged with the radixes it acts on
//! - [`StateVector`]: a normalized pure state
//! - [`PermutationMatrix`]: embeds a local operator into a register
//!
//! # Example
//!
//! ```rust
//! use qforge_qis::{Radixes, StateVector, UnitaryMatrix};
//! use qforge_qis::math::{C_ONE, C_ZERO};
//! use ndarray::array;
//!
//! let x = UnitaryMatrix::new(array![[C_ZERO, C_ONE], [C_ONE, C_ZERO]], Radixes::qubits(1)).unwrap();
//! let flipped = x.apply(&StateVector::zero(Radixes::qubits(1))).unwrap();
//! assert_eq!(flipped.get_probs(), vec![0.0, 1.0]);
//! ```

pub mod error;
pub mod math;
pub mod permutation;
pub mod radixes;
pub mod state;
pub mod unitary;

pub use error::{QisError, QisResult};
pub use permutation::PermutationMatrix;
pub use radixes::Radixes;
pub use state::StateVector;
pub use unitary::{DEFAULT_TOLERANCE, UnitaryMatrix};
