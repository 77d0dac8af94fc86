//! Property tests for the value types.

use ndarray::Array2;
use num_complex::Complex64;
use proptest::prelude::*;
use qforge_qis::math;
use qforge_qis::{PermutationMatrix, QisError, Radixes, StateVector, UnitaryMatrix};

fn arb_matrix(dim: usize) -> impl Strategy<Value = Array2<Complex64>> {
    prop::collection::vec((-1.0f64..1.0, -1.0f64..1.0), dim * dim).prop_map(move |entries| {
        Array2::from_shape_fn((dim, dim), |(i, j)| {
            let (re, im) = entries[i * dim + j];
            Complex64::new(re, im)
        })
    })
}

fn arb_radixes() -> impl Strategy<Value = Radixes> {
    prop::collection::vec(2usize..=3, 1..=3).prop_map(|r| Radixes::new(r).unwrap())
}

// ----------------------------------------------------------------------------
// UnitaryMatrix
// ----------------------------------------------------------------------------

proptest! {
    #[test]
    fn closest_to_is_unitary(m in arb_matrix(4)) {
        let u = UnitaryMatrix::closest_to(&m, Radixes::qubits(2)).unwrap();
        prop_assert!(UnitaryMatrix::is_unitary(u.as_array(), 1e-8));
    }

    #[test]
    fn closest_to_fixes_unitaries(m in arb_matrix(3)) {
        let u = UnitaryMatrix::closest_to(&m, Radixes::qutrits(1)).unwrap();
        let again = UnitaryMatrix::closest_to(u.as_array(), Radixes::qutrits(1)).unwrap();
        prop_assert!(math::max_abs_diff(u.as_array(), again.as_array()) < 1e-8);
    }

    #[test]
    fn dagger_inverts(m in arb_matrix(2)) {
        let u = UnitaryMatrix::closest_to(&m, Radixes::qubits(1)).unwrap();
        let id = u.dot(&u.dagger()).unwrap();
        prop_assert!(id.get_distance_from(&UnitaryMatrix::identity(Radixes::qubits(1))) < 1e-10);
    }
}

#[test]
fn test_otimes_dimensions_follow_radixes() {
    let a = UnitaryMatrix::identity(Radixes::qubits(1));
    let b = UnitaryMatrix::identity(Radixes::qutrits(1));
    let ab = a.otimes(&b);
    assert_eq!(ab.dim(), 6);
    assert_eq!(ab.radixes().as_slice(), &[2, 3]);
}

// ----------------------------------------------------------------------------
// StateVector
// ----------------------------------------------------------------------------

proptest! {
    #[test]
    fn unitaries_preserve_norm(m in arb_matrix(4)) {
        let u = UnitaryMatrix::closest_to(&m, Radixes::qubits(2)).unwrap();
        let state = u.apply(&StateVector::zero(Radixes::qubits(2))).unwrap();
        let total: f64 = state.get_probs().iter().sum();
        prop_assert!((total - 1.0).abs() < 1e-10);
    }
}

#[test]
fn test_state_radix_mismatch() {
    let u = UnitaryMatrix::identity(Radixes::qubits(1));
    let s = StateVector::zero(Radixes::qutrits(1));
    assert!(matches!(u.apply(&s), Err(QisError::DimensionMismatch { .. })));
}

// ----------------------------------------------------------------------------
// PermutationMatrix
// ----------------------------------------------------------------------------

proptest! {
    #[test]
    fn permutations_are_orthogonal(radixes in arb_radixes(), pick in 0usize..3) {
        let location = [pick % radixes.size()];
        let p = PermutationMatrix::from_qudit_location(&radixes, &location).unwrap();
        let product = p.as_array().dot(&p.as_array().t());
        prop_assert_eq!(product, math::identity(radixes.dim()));
    }

    #[test]
    fn embedding_preserves_unitarity(radixes in arb_radixes(), m in arb_matrix(3)) {
        let qutrit = radixes.iter().position(|&r| r == 3);
        prop_assume!(qutrit.is_some());
        let location = [qutrit.unwrap()];
        let local = UnitaryMatrix::closest_to(&m, Radixes::qutrits(1)).unwrap();
        let p = PermutationMatrix::from_qudit_location(&radixes, &location).unwrap();
        let embedded = p.embed(local.as_array()).unwrap();
        prop_assert!(UnitaryMatrix::is_unitary(&embedded, 1e-8));
    }
}
