//! IBM-style single-qubit gates U1, U2 and U3.

use std::f64::consts::FRAC_1_SQRT_2;

use ndarray::{Array2, array};
use num_complex::Complex64;
use qforge_qis::math::{C_I, C_ONE, C_ZERO};
use qforge_qis::{Radixes, UnitaryMatrix};

use super::one_qubit;
use crate::error::IrResult;
use crate::gate::{Gate, Gradient};
use crate::unitary::Unitary;

/// Phase gate `diag(1, e^{iλ})`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct U1Gate;

impl Unitary for U1Gate {
    fn name(&self) -> String {
        "u1".into()
    }

    fn radixes(&self) -> &Radixes {
        one_qubit()
    }

    fn num_params(&self) -> usize {
        1
    }
}

impl Gate for U1Gate {
    fn is_differentiable(&self) -> bool {
        true
    }

    fn get_unitary(&self, params: &[f64]) -> IrResult<UnitaryMatrix> {
        self.check_parameters(params)?;
        let m = array![[C_ONE, C_ZERO], [C_ZERO, Complex64::cis(params[0])]];
        Ok(UnitaryMatrix::new(m, one_qubit().clone())?)
    }

    fn get_grad(&self, params: &[f64]) -> IrResult<Gradient> {
        self.check_parameters(params)?;
        Ok(vec![array![
            [C_ZERO, C_ZERO],
            [C_ZERO, C_I * Complex64::cis(params[0])]
        ]])
    }

    /// Only `E₁₁·e^{iλ}` depends on λ; it is real and maximal at `λ = -arg(E₁₁)`.
    fn optimize(&self, env: &Array2<Complex64>) -> IrResult<Vec<f64>> {
        self.check_environment(env)?;
        Ok(vec![-env[[1, 1]].arg()])
    }
}

/// `U2(φ, λ) = U3(π/2, φ, λ)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct U2Gate;

impl Unitary for U2Gate {
    fn name(&self) -> String {
        "u2".into()
    }

    fn radixes(&self) -> &Radixes {
        one_qubit()
    }

    fn num_params(&self) -> usize {
        2
    }
}

impl Gate for U2Gate {
    fn is_differentiable(&self) -> bool {
        true
    }

    fn get_unitary(&self, params: &[f64]) -> IrResult<UnitaryMatrix> {
        self.check_parameters(params)?;
        let (phi, lambda) = (params[0], params[1]);
        let m = array![
            [C_ONE, -Complex64::cis(lambda)],
            [Complex64::cis(phi), Complex64::cis(phi + lambda)]
        ]
        .mapv(|v| v * FRAC_1_SQRT_2);
        Ok(UnitaryMatrix::new(m, one_qubit().clone())?)
    }

    fn get_grad(&self, params: &[f64]) -> IrResult<Gradient> {
        self.check_parameters(params)?;
        let (phi, lambda) = (params[0], params[1]);
        let both = C_I * Complex64::cis(phi + lambda);
        let d_phi = array![[C_ZERO, C_ZERO], [C_I * Complex64::cis(phi), both]];
        let d_lambda = array![[C_ZERO, -C_I * Complex64::cis(lambda)], [C_ZERO, both]];
        Ok(vec![
            d_phi.mapv(|v| v * FRAC_1_SQRT_2),
            d_lambda.mapv(|v| v * FRAC_1_SQRT_2),
        ])
    }
}

/// General single-qubit gate `U3(θ, φ, λ)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct U3Gate;

impl Unitary for U3Gate {
    fn name(&self) -> String {
        "u3".into()
    }

    fn radixes(&self) -> &Radixes {
        one_qubit()
    }

    fn num_params(&self) -> usize {
        3
    }
}

impl Gate for U3Gate {
    fn is_differentiable(&self) -> bool {
        true
    }

    fn get_unitary(&self, params: &[f64]) -> IrResult<UnitaryMatrix> {
        self.check_parameters(params)?;
        let (s, c) = (params[0] / 2.0).sin_cos();
        let (el, ep, epl) = phases(params[1], params[2]);
        let m = array![[C_ONE * c, -el * s], [ep * s, epl * c]];
        Ok(UnitaryMatrix::new(m, one_qubit().clone())?)
    }

    fn get_grad(&self, params: &[f64]) -> IrResult<Gradient> {
        self.check_parameters(params)?;
        let (s, c) = (params[0] / 2.0).sin_cos();
        let (el, ep, epl) = phases(params[1], params[2]);
        let d_theta = array![
            [C_ONE * (-s / 2.0), -el * (c / 2.0)],
            [ep * (c / 2.0), -epl * (s / 2.0)]
        ];
        let d_phi = array![[C_ZERO, C_ZERO], [C_I * ep * s, C_I * epl * c]];
        let d_lambda = array![[C_ZERO, -C_I * el * s], [C_ZERO, C_I * epl * c]];
        Ok(vec![d_theta, d_phi, d_lambda])
    }
}

/// `(e^{iλ}, e^{iφ}, e^{i(φ+λ)})`.
fn phases(phi: f64, lambda: f64) -> (Complex64, Complex64, Complex64) {
    (
        Complex64::cis(lambda),
        Complex64::cis(phi),
        Complex64::cis(phi + lambda),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gates::{HGate, RZGate};
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_u2_matches_u3() {
        let (phi, lambda) = (0.3, -1.1);
        let u2 = U2Gate.get_unitary(&[phi, lambda]).unwrap();
        let u3 = U3Gate.get_unitary(&[FRAC_PI_2, phi, lambda]).unwrap();
        assert!(u2.get_distance_from(&u3) < 1e-12);
    }

    #[test]
    fn test_u2_zero_pi_is_hadamard() {
        let u = U2Gate.get_unitary(&[0.0, PI]).unwrap();
        assert!(u.get_distance_from(&HGate.get_unitary(&[]).unwrap()) < 1e-12);
    }

    #[test]
    fn test_u1_is_rz_up_to_phase() {
        let u1 = U1Gate.get_unitary(&[0.9]).unwrap();
        let rz = RZGate.get_unitary(&[0.9]).unwrap();
        assert!(u1.get_distance_from(&rz) < 1e-12);
    }

    #[test]
    fn test_u1_optimize() {
        let target = U1Gate.get_unitary(&[-2.2]).unwrap();
        let found = U1Gate.optimize(&target.dagger().into_array()).unwrap();
        assert!((found[0] + 2.2).abs() < 1e-10);
    }

    #[test]
    fn test_u3_is_not_optimizable() {
        let env = Array2::<Complex64>::eye(2);
        assert!(U3Gate.optimize(&env).is_err());
        assert_eq!(U3Gate.num_params(), 3);
        assert!(U3Gate.is_parameterized());
    }
}
