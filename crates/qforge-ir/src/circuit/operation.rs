//! A gate placed on a location.

use std::fmt;

use qforge_qis::UnitaryMatrix;

use crate::error::{IrError, IrResult};
use crate::gate::GateRef;
use crate::location::CircuitLocation;

/// A gate applied to a location with its own parameter values.
#[derive(Debug, Clone)]
pub struct Operation {
    gate: GateRef,
    location: CircuitLocation,
    params: Vec<f64>,
}

impl Operation {
    /// Checks that the location and parameters fit the gate.
    pub fn new(gate: GateRef, location: CircuitLocation, params: Vec<f64>) -> IrResult<Self> {
        if location.len() != gate.size() {
            return Err(IrError::LocationSizeMismatch {
                gate: gate.name(),
                expected: gate.size(),
                got: location.len(),
            });
        }
        gate.check_parameters(&params)?;
        Ok(Self {
            gate,
            location,
            params,
        })
    }

    pub fn gate(&self) -> &GateRef {
        &self.gate
    }

    pub fn location(&self) -> &CircuitLocation {
        &self.location
    }

    pub fn params(&self) -> &[f64] {
        &self.params
    }

    pub fn num_params(&self) -> usize {
        self.params.len()
    }

    pub fn size(&self) -> usize {
        self.location.len()
    }

    /// The gate's unitary at this operation's parameters.
    pub fn get_unitary(&self) -> IrResult<UnitaryMatrix> {
        self.gate.get_unitary(&self.params)
    }

    pub(crate) fn params_mut(&mut self) -> &mut Vec<f64> {
        &mut self.params
    }

    pub(crate) fn replace_gate(&mut self, gate: GateRef, params: Vec<f64>) {
        self.gate = gate;
        self.params = params;
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.gate.name(), self.location)?;
        if !self.params.is_empty() {
            write!(f, "{:?}", self.params)?;
        }
        Ok(())
    }
}
