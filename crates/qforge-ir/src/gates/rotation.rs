//! Single-parameter rotation gates.

use ndarray::{Array2, array};
use num_complex::Complex64;
use qforge_qis::math::{C_I, C_ZERO};
use qforge_qis::{Radixes, UnitaryMatrix};

use super::{one_qubit, two_qubits};
use crate::error::IrResult;
use crate::gate::{Gate, Gradient};
use crate::unitary::Unitary;

fn re(x: f64) -> Complex64 {
    Complex64::new(x, 0.0)
}

/// Rotation about X: `exp(-iθX/2)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RXGate;

impl Unitary for RXGate {
    fn name(&self) -> String {
        "rx".into()
    }

    fn radixes(&self) -> &Radixes {
        one_qubit()
    }

    fn num_params(&self) -> usize {
        1
    }
}

impl Gate for RXGate {
    fn is_differentiable(&self) -> bool {
        true
    }

    fn get_unitary(&self, params: &[f64]) -> IrResult<UnitaryMatrix> {
        self.check_parameters(params)?;
        let (s, c) = (params[0] / 2.0).sin_cos();
        let m = array![[re(c), -C_I * s], [-C_I * s, re(c)]];
        Ok(UnitaryMatrix::new(m, one_qubit().clone())?)
    }

    fn get_grad(&self, params: &[f64]) -> IrResult<Gradient> {
        self.check_parameters(params)?;
        let (s, c) = (params[0] / 2.0).sin_cos();
        let d = array![[re(-s), -C_I * c], [-C_I * c, re(-s)]].mapv(|v| v * 0.5);
        Ok(vec![d])
    }
}

/// Rotation about Y: `exp(-iθY/2)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RYGate;

impl Unitary for RYGate {
    fn name(&self) -> String {
        "ry".into()
    }

    fn radixes(&self) -> &Radixes {
        one_qubit()
    }

    fn num_params(&self) -> usize {
        1
    }
}

impl Gate for RYGate {
    fn is_differentiable(&self) -> bool {
        true
    }

    fn get_unitary(&self, params: &[f64]) -> IrResult<UnitaryMatrix> {
        self.check_parameters(params)?;
        let (s, c) = (params[0] / 2.0).sin_cos();
        let m = array![[re(c), re(-s)], [re(s), re(c)]];
        Ok(UnitaryMatrix::new(m, one_qubit().clone())?)
    }

    fn get_grad(&self, params: &[f64]) -> IrResult<Gradient> {
        self.check_parameters(params)?;
        let (s, c) = (params[0] / 2.0).sin_cos();
        let d = array![[re(-s), re(-c)], [re(c), re(-s)]].mapv(|v| v * 0.5);
        Ok(vec![d])
    }
}

/// Rotation about Z: `diag(e^{-iθ/2}, e^{iθ/2})`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RZGate;

impl Unitary for RZGate {
    fn name(&self) -> String {
        "rz".into()
    }

    fn radixes(&self) -> &Radixes {
        one_qubit()
    }

    fn num_params(&self) -> usize {
        1
    }
}

impl Gate for RZGate {
    fn is_differentiable(&self) -> bool {
        true
    }

    fn get_unitary(&self, params: &[f64]) -> IrResult<UnitaryMatrix> {
        self.check_parameters(params)?;
        let half = params[0] / 2.0;
        let m = array![
            [Complex64::cis(-half), C_ZERO],
            [C_ZERO, Complex64::cis(half)]
        ];
        Ok(UnitaryMatrix::new(m, one_qubit().clone())?)
    }

    fn get_grad(&self, params: &[f64]) -> IrResult<Gradient> {
        self.check_parameters(params)?;
        let half = params[0] / 2.0;
        let d = array![
            [-0.5 * C_I * Complex64::cis(-half), C_ZERO],
            [C_ZERO, 0.5 * C_I * Complex64::cis(half)]
        ];
        Ok(vec![d])
    }

    /// `Re Tr(E·RZ(θ)) = a·cos(θ/2) + b·sin(θ/2)` with `a = Re(E₀₀ + E₁₁)`
    /// and `b = Im(E₀₀ − E₁₁)`, maximized at `θ = 2·atan2(b, a)`.
    fn optimize(&self, env: &Array2<Complex64>) -> IrResult<Vec<f64>> {
        self.check_environment(env)?;
        let a = env[[0, 0]].re + env[[1, 1]].re;
        let b = env[[0, 0]].im - env[[1, 1]].im;
        Ok(vec![2.0 * b.atan2(a)])
    }
}

/// Ising XX coupling: `cos(θ/2)·I − i·sin(θ/2)·X⊗X`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RXXGate;

fn rxx_like(c: Complex64, s: Complex64) -> Array2<Complex64> {
    array![
        [c, C_ZERO, C_ZERO, s],
        [C_ZERO, c, s, C_ZERO],
        [C_ZERO, s, c, C_ZERO],
        [s, C_ZERO, C_ZERO, c],
    ]
}

impl Unitary for RXXGate {
    fn name(&self) -> String {
        "rxx".into()
    }

    fn radixes(&self) -> &Radixes {
        two_qubits()
    }

    fn num_params(&self) -> usize {
        1
    }
}

impl Gate for RXXGate {
    fn is_differentiable(&self) -> bool {
        true
    }

    fn get_unitary(&self, params: &[f64]) -> IrResult<UnitaryMatrix> {
        self.check_parameters(params)?;
        let (s, c) = (params[0] / 2.0).sin_cos();
        Ok(UnitaryMatrix::new(rxx_like(re(c), -C_I * s), two_qubits().clone())?)
    }

    fn get_grad(&self, params: &[f64]) -> IrResult<Gradient> {
        self.check_parameters(params)?;
        let (s, c) = (params[0] / 2.0).sin_cos();
        Ok(vec![rxx_like(re(-s / 2.0), -C_I * (c / 2.0))])
    }
}

/// Ising ZZ coupling: `exp(-iθZ⊗Z/2)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RZZGate;

fn rzz_like(even: Complex64, odd: Complex64) -> Array2<Complex64> {
    array![
        [even, C_ZERO, C_ZERO, C_ZERO],
        [C_ZERO, odd, C_ZERO, C_ZERO],
        [C_ZERO, C_ZERO, odd, C_ZERO],
        [C_ZERO, C_ZERO, C_ZERO, even],
    ]
}

impl Unitary for RZZGate {
    fn name(&self) -> String {
        "rzz".into()
    }

    fn radixes(&self) -> &Radixes {
        two_qubits()
    }

    fn num_params(&self) -> usize {
        1
    }
}

impl Gate for RZZGate {
    fn is_differentiable(&self) -> bool {
        true
    }

    fn get_unitary(&self, params: &[f64]) -> IrResult<UnitaryMatrix> {
        self.check_parameters(params)?;
        let half = params[0] / 2.0;
        let m = rzz_like(Complex64::cis(-half), Complex64::cis(half));
        Ok(UnitaryMatrix::new(m, two_qubits().clone())?)
    }

    fn get_grad(&self, params: &[f64]) -> IrResult<Gradient> {
        self.check_parameters(params)?;
        let half = params[0] / 2.0;
        Ok(vec![rzz_like(
            -0.5 * C_I * Complex64::cis(-half),
            0.5 * C_I * Complex64::cis(half),
        )])
    }
}
