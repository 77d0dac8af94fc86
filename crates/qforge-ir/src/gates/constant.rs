//! Parameter-free gates.

use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_4, FRAC_PI_8};

use ndarray::{Array2, array};
use num_complex::Complex64;
use qforge_qis::math::{C_ONE, C_ZERO};
use qforge_qis::{Radixes, UnitaryMatrix};

use super::{one_qubit, two_qubits, two_qutrits};
use crate::error::IrResult;
use crate::gate::{Gate, Gradient};
use crate::unitary::Unitary;

/// Declares a unit-struct gate with a fixed matrix. Constant gates are
/// trivially differentiable: their gradient is empty.
macro_rules! constant_gate {
    (
        $(#[$meta:meta])*
        $gate:ident, $name:literal, $radixes:expr, $matrix:expr
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub struct $gate;

        impl Unitary for $gate {
            fn name(&self) -> String {
                $name.to_string()
            }

            fn radixes(&self) -> &Radixes {
                $radixes
            }

            fn num_params(&self) -> usize {
                0
            }
        }

        impl Gate for $gate {
            fn is_differentiable(&self) -> bool {
                true
            }

            fn get_unitary(&self, params: &[f64]) -> IrResult<UnitaryMatrix> {
                self.check_parameters(params)?;
                Ok(UnitaryMatrix::new($matrix, self.radixes().clone())?)
            }

            fn get_grad(&self, params: &[f64]) -> IrResult<Gradient> {
                self.check_parameters(params)?;
                Ok(Vec::new())
            }
        }
    };
}

constant_gate!(
    /// Pauli-X.
    XGate,
    "x",
    one_qubit(),
    array![[C_ZERO, C_ONE], [C_ONE, C_ZERO]]
);

constant_gate!(
    /// Hadamard.
    HGate,
    "h",
    one_qubit(),
    array![[C_ONE, C_ONE], [C_ONE, -C_ONE]].mapv(|v| v * FRAC_1_SQRT_2)
);

constant_gate!(
    /// `diag(1, e^{iπ/4})`.
    TGate,
    "t",
    one_qubit(),
    array![[C_ONE, C_ZERO], [C_ZERO, Complex64::cis(FRAC_PI_4)]]
);

constant_gate!(
    /// `diag(1, e^{-iπ/4})`.
    TdgGate,
    "tdg",
    one_qubit(),
    array![[C_ONE, C_ZERO], [C_ZERO, Complex64::cis(-FRAC_PI_4)]]
);

constant_gate!(
    /// `diag(1, e^{iπ/8})`, the square root of T.
    SqrtTGate,
    "sqrtt",
    one_qubit(),
    array![[C_ONE, C_ZERO], [C_ZERO, Complex64::cis(FRAC_PI_8)]]
);

constant_gate!(
    /// Controlled-X with the first qubit as control.
    CNOTGate,
    "cx",
    two_qubits(),
    array![
        [C_ONE, C_ZERO, C_ZERO, C_ZERO],
        [C_ZERO, C_ONE, C_ZERO, C_ZERO],
        [C_ZERO, C_ZERO, C_ZERO, C_ONE],
        [C_ZERO, C_ZERO, C_ONE, C_ZERO],
    ]
);

constant_gate!(
    /// Controlled-Z.
    CZGate,
    "cz",
    two_qubits(),
    array![
        [C_ONE, C_ZERO, C_ZERO, C_ZERO],
        [C_ZERO, C_ONE, C_ZERO, C_ZERO],
        [C_ZERO, C_ZERO, C_ONE, C_ZERO],
        [C_ZERO, C_ZERO, C_ZERO, -C_ONE],
    ]
);

constant_gate!(
    /// Qutrit controlled increment: `|a, b> -> |a, a + b mod 3>`.
    CSUMGate,
    "csum",
    two_qutrits(),
    csum_matrix()
);

fn csum_matrix() -> Array2<Complex64> {
    let mut m = Array2::zeros((9, 9));
    for a in 0..3 {
        for b in 0..3 {
            m[[a * 3 + (a + b) % 3, a * 3 + b]] = C_ONE;
        }
    }
    m
}

/// The identity on an arbitrary register.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityGate {
    radixes: Radixes,
}

impl IdentityGate {
    pub fn new(radixes: Radixes) -> Self {
        Self { radixes }
    }

    pub fn qubits(n: usize) -> Self {
        Self::new(Radixes::qubits(n))
    }
}

impl Unitary for IdentityGate {
    fn name(&self) -> String {
        format!("identity{}", self.radixes)
    }

    fn radixes(&self) -> &Radixes {
        &self.radixes
    }

    fn num_params(&self) -> usize {
        0
    }
}

impl Gate for IdentityGate {
    fn is_differentiable(&self) -> bool {
        true
    }

    fn get_unitary(&self, params: &[f64]) -> IrResult<UnitaryMatrix> {
        self.check_parameters(params)?;
        Ok(UnitaryMatrix::identity(self.radixes.clone()))
    }

    fn get_grad(&self, params: &[f64]) -> IrResult<Gradient> {
        self.check_parameters(params)?;
        Ok(Vec::new())
    }
}

/// A gate wrapping a fixed, user-supplied unitary.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantUnitaryGate {
    utry: UnitaryMatrix,
}

impl ConstantUnitaryGate {
    pub fn new(utry: UnitaryMatrix) -> Self {
        Self { utry }
    }

    pub fn unitary(&self) -> &UnitaryMatrix {
        &self.utry
    }
}

impl From<UnitaryMatrix> for ConstantUnitaryGate {
    fn from(utry: UnitaryMatrix) -> Self {
        Self::new(utry)
    }
}

impl Unitary for ConstantUnitaryGate {
    fn name(&self) -> String {
        format!("unitary{}", self.utry.radixes())
    }

    fn radixes(&self) -> &Radixes {
        self.utry.radixes()
    }

    fn num_params(&self) -> usize {
        0
    }
}

impl Gate for ConstantUnitaryGate {
    fn is_differentiable(&self) -> bool {
        true
    }

    fn get_unitary(&self, params: &[f64]) -> IrResult<UnitaryMatrix> {
        self.check_parameters(params)?;
        Ok(self.utry.clone())
    }

    fn get_grad(&self, params: &[f64]) -> IrResult<Gradient> {
        self.check_parameters(params)?;
        Ok(Vec::new())
    }
}
