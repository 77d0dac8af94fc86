//! Gates built from other gates.

mod frozen;
mod varloc;

pub use frozen::{FrozenParameterGate, with_all_frozen_params, with_frozen_params};
pub use varloc::VariableLocationGate;
