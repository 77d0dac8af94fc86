//! The primitive gate library.
//!
//! | Gate | Qudits | Params | Description |
//! |------|--------|--------|-------------|
//! | [`IdentityGate`] | any | 0 | Identity on arbitrary radixes |
//! | [`XGate`], [`HGate`] | 1 | 0 | Pauli-X, Hadamard |
//! | [`TGate`], [`TdgGate`], [`SqrtTGate`] | 1 | 0 | Phase gates |
//! | [`CNOTGate`], [`CZGate`] | 2 | 0 | Controlled-X, controlled-Z |
//! | [`CSUMGate`] | 2 qutrits | 0 | Qutrit controlled increment |
//! | [`ConstantUnitaryGate`] | any | 0 | Fixed user-supplied unitary |
//! | [`RXGate`], [`RYGate`], [`RZGate`] | 1 | 1 | Pauli rotations |
//! | [`U1Gate`], [`U2Gate`], [`U3Gate`] | 1 | 1, 2, 3 | IBM-style single-qubit gates |
//! | [`RXXGate`], [`RZZGate`] | 2 | 1 | Ising couplings |
//! | [`VariableUnitaryGate`] | any | 2d² | General unitary |

mod constant;
mod rotation;
mod universal;
mod variable;

use std::sync::LazyLock;

use qforge_qis::Radixes;

pub use constant::{
    CNOTGate, CSUMGate, CZGate, ConstantUnitaryGate, HGate, IdentityGate, SqrtTGate, TGate,
    TdgGate, XGate,
};
pub use rotation::{RXGate, RXXGate, RYGate, RZGate, RZZGate};
pub use universal::{U1Gate, U2Gate, U3Gate};
pub use variable::VariableUnitaryGate;

static ONE_QUBIT: LazyLock<Radixes> = LazyLock::new(|| Radixes::qubits(1));
static TWO_QUBITS: LazyLock<Radixes> = LazyLock::new(|| Radixes::qubits(2));
static TWO_QUTRITS: LazyLock<Radixes> = LazyLock::new(|| Radixes::qutrits(2));

pub(crate) fn one_qubit() -> &'static Radixes {
    &ONE_QUBIT
}

pub(crate) fn two_qubits() -> &'static Radixes {
    &TWO_QUBITS
}

pub(crate) fn two_qutrits() -> &'static Radixes {
    &TWO_QUTRITS
}
