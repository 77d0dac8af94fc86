//! Frozen-parameter and variable-location gates used end to end.

use std::sync::Arc;

use proptest::prelude::*;
use qforge_ir::gates::{CNOTGate, ConstantUnitaryGate, RXXGate, U3Gate, XGate};
use qforge_ir::{
    Circuit, CircuitLocation, DynGateEq, ErrorKind, FrozenParameterGate, Gate, GateRef, IrError,
    Radixes, UnreferencedQuditPolicy, Unitary, UnitaryMatrix, VariableLocationConfig,
    VariableLocationGate, with_all_frozen_params, with_frozen_params,
};

fn loc(qudits: &[usize]) -> CircuitLocation {
    CircuitLocation::new(qudits).unwrap()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("qforge_ir=debug")
        .with_test_writer()
        .try_init();
}

// ----------------------------------------------------------------------------
// FrozenParameterGate
// ----------------------------------------------------------------------------

#[test]
fn test_freeze_middle_parameter() {
    let gate = with_frozen_params(Arc::new(U3Gate), [(1, 0.5)]).unwrap();
    assert_eq!(gate.num_params(), 2);
    assert_eq!(gate.get_full_params(&[0.1, 0.9]).unwrap(), vec![0.1, 0.5, 0.9]);
}

#[test]
fn test_freeze_round_trip_in_circuit() {
    init_tracing();
    let mut c = Circuit::new(1).unwrap();
    let original = [0.3, -0.7, 1.1];
    c.append_gate(Arc::new(U3Gate), [0], &original).unwrap();
    let before = c.get_unitary(c.params()).unwrap();

    for remaining in (0..3).rev() {
        c.freeze_param(0).unwrap();
        assert_eq!(c.num_params(), remaining);
        c.verify_integrity().unwrap();
        let after = c.get_unitary(c.params()).unwrap();
        assert_eq!(before, after);
    }
    assert!(c.is_constant());

    // Unwrap the nested wrappers: each fixes local index 0 of the next.
    let op = c.get_operation((0, 0)).unwrap();
    let mut layer: &GateRef = op.gate();
    let mut depth = 0;
    while let Some(frozen) = layer.as_any().downcast_ref::<FrozenParameterGate>() {
        assert_eq!(frozen.fixed_params().len(), 1);
        depth += 1;
        layer = frozen.subgate();
    }
    assert_eq!(depth, 3);
    assert!(layer.as_any().downcast_ref::<U3Gate>().is_some());
}

#[test]
fn test_full_params_reproduce_frozen_values() {
    let original = [0.3, -0.7, 1.1];
    let mut c = Circuit::new(1).unwrap();
    c.append_gate(Arc::new(U3Gate), [0], &original).unwrap();
    c.freeze_param(1).unwrap();
    let op = c.get_operation((0, 0)).unwrap();
    let frozen = op
        .gate()
        .as_any()
        .downcast_ref::<FrozenParameterGate>()
        .unwrap();
    assert_eq!(frozen.get_full_params(op.params()).unwrap(), original.to_vec());
}

#[test]
fn test_frozen_gates_are_distinct_in_gate_set() {
    let mut c = Circuit::new(2).unwrap();
    let a: GateRef = with_all_frozen_params(Arc::new(U3Gate), &[0.1, 0.2, 0.3]).unwrap().into();
    let b: GateRef = with_all_frozen_params(Arc::new(U3Gate), &[0.1, 0.2, 0.4]).unwrap().into();
    c.append_gate(a.clone(), [0], &[]).unwrap();
    c.append_gate(a, [1], &[]).unwrap();
    c.append_gate(b, [0], &[]).unwrap();
    assert_eq!(c.gate_set().len(), 2);
    assert!(c.is_constant());
}

#[test]
fn test_remove_matches_frozen_gate_by_value() {
    let mut c = Circuit::new(2).unwrap();
    let rz_frozen: GateRef =
        with_all_frozen_params(Arc::new(qforge_ir::gates::RZGate), &[0.4]).unwrap().into();
    let u3_frozen: GateRef = with_all_frozen_params(Arc::new(U3Gate), &[0.4, 0.0, 0.0]).unwrap().into();
    c.append_gate(u3_frozen, [0], &[]).unwrap();
    c.append_gate(rz_frozen, [1], &[]).unwrap();

    // A freshly built, equal wrapper finds the existing operation.
    let lookup = with_all_frozen_params(Arc::new(qforge_ir::gates::RZGate), &[0.4]).unwrap();
    let removed = c.remove(&lookup).unwrap();
    assert_eq!(removed.location().qudits(), &[1]);
    assert_eq!(c.num_operations(), 1);

    let other = with_all_frozen_params(Arc::new(qforge_ir::gates::RZGate), &[0.5]).unwrap();
    assert!(matches!(c.remove(&other), Err(IrError::GateNotFound { .. })));
    assert_eq!(c.num_operations(), 1);
}

#[test]
fn test_variable_location_gates_in_gate_set() {
    let build = |gate: GateRef| {
        VariableLocationGate::new(gate, vec![loc(&[0, 1]), loc(&[1, 2])]).unwrap()
    };
    let mut c = Circuit::new(3).unwrap();
    c.append_gate(Arc::new(build(Arc::new(CNOTGate))), [0, 1, 2], &[0.0, 0.0]).unwrap();
    c.append_gate(Arc::new(build(Arc::new(CNOTGate))), [0, 1, 2], &[1.0, 0.0]).unwrap();
    c.append_gate(Arc::new(build(Arc::new(RXXGate))), [0, 1, 2], &[0.2, 0.0, 0.0]).unwrap();
    assert_eq!(c.gate_set().len(), 2);

    c.remove(&build(Arc::new(RXXGate))).unwrap();
    assert_eq!(c.num_operations(), 2);
    assert_eq!(c.gate_set().len(), 1);
}

// ----------------------------------------------------------------------------
// VariableLocationGate
// ----------------------------------------------------------------------------

#[test]
fn test_variable_location_in_circuit() {
    init_tracing();
    let gate = VariableLocationGate::new(
        Arc::new(CNOTGate),
        vec![loc(&[0, 1]), loc(&[1, 2]), loc(&[0, 2])],
    )
    .unwrap();
    assert_eq!(gate.size(), 3);

    let mut c = Circuit::new(3).unwrap();
    c.append_gate(Arc::new(gate), [0, 1, 2], &[0.0, 1.0, 0.0]).unwrap();
    assert_eq!(c.num_params(), 3);
    assert!(c.is_differentiable());
    let grads = c.get_grad(c.params()).unwrap();
    assert_eq!(grads.len(), 3);
}

#[test]
fn test_location_selection_follows_weights() {
    let gate =
        VariableLocationGate::new(Arc::new(XGate), vec![loc(&[0]), loc(&[1])]).unwrap();
    assert_eq!(gate.get_location(&[5.0, 0.0]).unwrap(), &loc(&[0]));
    assert_eq!(gate.get_location(&[0.0, 5.0]).unwrap(), &loc(&[1]));

    // With a decisive weight the gate is X on that qubit.
    let u = gate.get_unitary(&[0.0, 5.0]).unwrap();
    let x = XGate.get_unitary(&[]).unwrap();
    let expected = UnitaryMatrix::identity(Radixes::qubits(1)).otimes(&x);
    assert!(u.get_distance_from(&expected) < 1e-6);
}

#[test]
fn test_variable_location_config() {
    let config = VariableLocationConfig::from_json_str(
        r#"{"temperature": 4.0, "unreferenced_qudits": {"policy": "reject"}}"#,
    )
    .unwrap();
    let err = VariableLocationGate::with_config(
        Arc::new(U3Gate),
        vec![loc(&[0]), loc(&[2])],
        config.clone(),
    )
    .unwrap_err();
    assert!(matches!(err, IrError::UnreferencedQudit { qudit: 1 }));

    let gate = VariableLocationGate::with_config(
        Arc::new(U3Gate),
        vec![loc(&[0]), loc(&[1])],
        config,
    )
    .unwrap();
    assert_eq!(gate.config().temperature, 4.0);
    assert_eq!(
        gate.config().unreferenced_qudits,
        UnreferencedQuditPolicy::Reject
    );
}

#[test]
fn test_candidate_radix_disagreement() {
    let mixed = ConstantUnitaryGate::new(UnitaryMatrix::identity(
        Radixes::new(vec![2, 3]).unwrap(),
    ));
    let err = VariableLocationGate::new(Arc::new(mixed), vec![loc(&[0, 1]), loc(&[1, 0])])
        .unwrap_err();
    assert!(matches!(
        err,
        IrError::CandidateRadixMismatch { qudit: 1, first: 3, second: 2 }
    ));
    assert_eq!(err.kind(), ErrorKind::Value);
}

fn arb_weights(n: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0f64..1.0, n)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn variable_location_is_unitary(theta in -3.0f64..3.0, weights in arb_weights(3)) {
        let gate = VariableLocationGate::new(
            Arc::new(RXXGate),
            vec![loc(&[0, 1]), loc(&[1, 2]), loc(&[2, 0])],
        )
        .unwrap();
        let mut params = vec![theta];
        params.extend(weights);
        let u = gate.get_unitary(&params).unwrap();
        prop_assert!(UnitaryMatrix::is_unitary(u.as_array(), 1e-8));
        prop_assert_eq!(gate.get_grad(&params).unwrap().len(), 4);
    }
}
