//! Gates whose placement is itself a continuous parameter.

use ndarray::Array2;
use num_complex::Complex64;
use qforge_qis::{PermutationMatrix, Radixes, UnitaryMatrix, math};
use tracing::{debug, warn};

use crate::config::{UnreferencedQuditPolicy, VariableLocationConfig};
use crate::error::{IrError, IrResult};
use crate::gate::{Gate, GateRef, Gradient};
use crate::location::CircuitLocation;
use crate::unitary::Unitary;

/// A gate applied to a softmax-weighted superposition of candidate
/// locations.
///
/// Parameters are the subgate's parameters followed by one raw weight per
/// candidate. With `w = softmax(β·x)` and `P = Σ wᵢ·Permᵢ`, the gate's unitary
/// is the closest unitary to `P·(G ⊗ I)·Pᵀ`.
#[derive(Debug, Clone)]
pub struct VariableLocationGate {
    gate: GateRef,
    locations: Vec<CircuitLocation>,
    radixes: Radixes,
    config: VariableLocationConfig,
    perms: Vec<Array2<Complex64>>,
    pad_dim: usize,
}

impl VariableLocationGate {
    pub fn new(gate: GateRef, locations: Vec<CircuitLocation>) -> IrResult<Self> {
        Self::with_config(gate, locations, VariableLocationConfig::default())
    }

    pub fn with_config(
        gate: GateRef,
        locations: Vec<CircuitLocation>,
        config: VariableLocationConfig,
    ) -> IrResult<Self> {
        config.validate()?;
        if locations.is_empty() {
            return Err(IrError::NoCandidateLocations);
        }
        for location in &locations {
            if location.len() != gate.size() {
                return Err(IrError::CandidateSizeMismatch {
                    gate: gate.name(),
                    location: location.qudits().to_vec(),
                    expected: gate.size(),
                    got: location.len(),
                });
            }
        }

        let size = locations.iter().map(CircuitLocation::max_qudit).max().unwrap_or(0) + 1;
        let mut seen: Vec<Option<usize>> = vec![None; size];
        for location in &locations {
            for (qudit, &radix) in location.iter().zip(gate.radixes().iter()) {
                match seen[qudit] {
                    Some(first) if first != radix => {
                        return Err(IrError::CandidateRadixMismatch {
                            qudit,
                            first,
                            second: radix,
                        });
                    }
                    _ => seen[qudit] = Some(radix),
                }
            }
        }

        let mut radixes = Vec::with_capacity(size);
        for (qudit, radix) in seen.into_iter().enumerate() {
            match (radix, config.unreferenced_qudits) {
                (Some(radix), _) => radixes.push(radix),
                (None, UnreferencedQuditPolicy::DefaultRadix(default)) => {
                    warn!(
                        qudit,
                        radix = default,
                        "qudit is not referenced by any candidate location; assuming default radix"
                    );
                    radixes.push(default);
                }
                (None, UnreferencedQuditPolicy::Reject) => {
                    return Err(IrError::UnreferencedQudit { qudit });
                }
            }
        }
        let radixes = Radixes::new(radixes)?;

        let perms = locations
            .iter()
            .map(|l| {
                PermutationMatrix::from_qudit_location(&radixes, l.qudits())
                    .map(|p| p.as_array().clone())
            })
            .collect::<Result<Vec<_>, _>>()?;
        let pad_dim = radixes.dim() / gate.dim();

        debug!(
            gate = %gate.name(),
            candidates = locations.len(),
            size,
            "built variable location gate"
        );
        Ok(Self {
            gate,
            locations,
            radixes,
            config,
            perms,
            pad_dim,
        })
    }

    pub fn subgate(&self) -> &GateRef {
        &self.gate
    }

    pub fn locations(&self) -> &[CircuitLocation] {
        &self.locations
    }

    pub fn config(&self) -> &VariableLocationConfig {
        &self.config
    }

    /// Splits `params` into subgate parameters and location weights.
    pub fn split_params<'a>(&self, params: &'a [f64]) -> IrResult<(&'a [f64], &'a [f64])> {
        self.check_parameters(params)?;
        Ok(params.split_at(self.gate.num_params()))
    }

    /// The candidate with the largest weight; ties go to the earliest.
    pub fn get_location(&self, params: &[f64]) -> IrResult<&CircuitLocation> {
        let (_, weights) = self.split_params(params)?;
        let best = weights
            .iter()
            .enumerate()
            .fold(0, |best, (i, &w)| if w > weights[best] { i } else { best });
        Ok(&self.locations[best])
    }

    fn superposition(&self, weights: &[f64]) -> Array2<Complex64> {
        let mut p = Array2::zeros(self.perms[0].raw_dim());
        for (perm, &w) in self.perms.iter().zip(weights) {
            p.scaled_add(Complex64::new(w, 0.0), perm);
        }
        p
    }

    fn pad(&self, local: &Array2<Complex64>) -> Array2<Complex64> {
        math::kron(local, &math::identity(self.pad_dim))
    }

    /// `P·(G ⊗ I)·Pᵀ` before unitary projection.
    fn raw_unitary(&self, params: &[f64]) -> IrResult<Array2<Complex64>> {
        let (sub, raw) = self.split_params(params)?;
        let p = self.superposition(&math::softmax(raw, self.config.temperature));
        let gi = self.pad(self.gate.get_unitary(sub)?.as_array());
        Ok(p.dot(&gi).dot(&p.t()))
    }

    /// Raw product and its exact gradient.
    fn raw_unitary_and_grad(&self, params: &[f64]) -> IrResult<(Array2<Complex64>, Gradient)> {
        let (sub, raw) = self.split_params(params)?;
        let beta = self.config.temperature;
        let weights = math::softmax(raw, beta);
        let p = self.superposition(&weights);
        let pt = p.t();

        let (utry, dgs) = self.gate.get_unitary_and_grad(sub)?;
        let gi = self.pad(utry.as_array());
        let gi_pt = gi.dot(&pt);
        let p_gi = p.dot(&gi);
        let product = p.dot(&gi_pt);

        let mut grads = Vec::with_capacity(self.num_params());
        for dg in &dgs {
            grads.push(p.dot(&self.pad(dg)).dot(&pt));
        }
        for (perm, &w) in self.perms.iter().zip(&weights) {
            let mut d = perm.dot(&gi_pt) + p_gi.dot(&perm.t());
            d.scaled_add(Complex64::new(-2.0, 0.0), &product);
            grads.push(d.mapv(|v| v * (beta * w)));
        }
        Ok((product, grads))
    }
}

impl PartialEq for VariableLocationGate {
    fn eq(&self, other: &Self) -> bool {
        *self.gate == *other.gate
            && self.locations == other.locations
            && self.radixes == other.radixes
            && self.config == other.config
    }
}

impl Unitary for VariableLocationGate {
    fn name(&self) -> String {
        format!("varloc({})", self.gate.name())
    }

    fn radixes(&self) -> &Radixes {
        &self.radixes
    }

    fn num_params(&self) -> usize {
        self.gate.num_params() + self.locations.len()
    }
}

impl Gate for VariableLocationGate {
    fn is_differentiable(&self) -> bool {
        self.gate.is_differentiable()
    }

    fn get_unitary(&self, params: &[f64]) -> IrResult<UnitaryMatrix> {
        let raw = self.raw_unitary(params)?;
        Ok(UnitaryMatrix::closest_to(&raw, self.radixes.clone())?)
    }

    /// Gradient of the unprojected product `P·(G ⊗ I)·Pᵀ`.
    fn get_grad(&self, params: &[f64]) -> IrResult<Gradient> {
        Ok(self.raw_unitary_and_grad(params)?.1)
    }

    fn get_unitary_and_grad(&self, params: &[f64]) -> IrResult<(UnitaryMatrix, Gradient)> {
        let (raw, grads) = self.raw_unitary_and_grad(params)?;
        Ok((UnitaryMatrix::closest_to(&raw, self.radixes.clone())?, grads))
    }
}
