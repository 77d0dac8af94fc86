//! Configuration for composed gates.
//!
//! Values are plain serde structs with per-field defaults, so a partial JSON
//! document (or none at all) yields a usable configuration:
//!
//! ```json
//! { "temperature": 25.0, "unreferenced_qudits": { "policy": "reject" } }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};

/// What a [`VariableLocationGate`](crate::composed::VariableLocationGate)
/// does with a qudit index that no candidate location references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "policy", content = "radix")]
pub enum UnreferencedQuditPolicy {
    /// Assume the given radix and log a warning.
    DefaultRadix(usize),
    /// Fail construction.
    Reject,
}

impl Default for UnreferencedQuditPolicy {
    fn default() -> Self {
        UnreferencedQuditPolicy::DefaultRadix(default_radix())
    }
}

/// Settings for variable-location gates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableLocationConfig {
    /// Softmax inverse temperature applied to the location weights.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Handling of qudits absent from every candidate location.
    #[serde(default)]
    pub unreferenced_qudits: UnreferencedQuditPolicy,
}

impl Default for VariableLocationConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            unreferenced_qudits: UnreferencedQuditPolicy::default(),
        }
    }
}

impl VariableLocationConfig {
    /// Parses and validates a JSON document.
    pub fn from_json_str(json: &str) -> IrResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| IrError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_unreferenced_qudits(mut self, policy: UnreferencedQuditPolicy) -> Self {
        self.unreferenced_qudits = policy;
        self
    }

    pub fn validate(&self) -> IrResult<()> {
        if !self.temperature.is_finite() || self.temperature <= 0.0 {
            return Err(IrError::InvalidConfig(format!(
                "temperature must be finite and positive, got {}",
                self.temperature
            )));
        }
        if let UnreferencedQuditPolicy::DefaultRadix(radix) = self.unreferenced_qudits {
            if radix < 2 {
                return Err(IrError::InvalidConfig(format!(
                    "default radix must be at least 2, got {radix}"
                )));
            }
        }
        Ok(())
    }
}

fn default_temperature() -> f64 {
    10.0
}

fn default_radix() -> usize {
    2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = VariableLocationConfig::default();
        assert_eq!(config.temperature, 10.0);
        assert_eq!(
            config.unreferenced_qudits,
            UnreferencedQuditPolicy::DefaultRadix(2)
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config = VariableLocationConfig::from_json_str("{}").unwrap();
        assert_eq!(config, VariableLocationConfig::default());

        let config = VariableLocationConfig::from_json_str(
            r#"{"temperature": 2.5, "unreferenced_qudits": {"policy": "reject"}}"#,
        )
        .unwrap();
        assert_eq!(config.temperature, 2.5);
        assert_eq!(config.unreferenced_qudits, UnreferencedQuditPolicy::Reject);

        let config = VariableLocationConfig::from_json_str(
            r#"{"unreferenced_qudits": {"policy": "default_radix", "radix": 3}}"#,
        )
        .unwrap();
        assert_eq!(
            config.unreferenced_qudits,
            UnreferencedQuditPolicy::DefaultRadix(3)
        );
    }

    #[test]
    fn test_validation() {
        assert!(
            VariableLocationConfig::default()
                .with_temperature(0.0)
                .validate()
                .is_err()
        );
        assert!(
            VariableLocationConfig::default()
                .with_temperature(f64::NAN)
                .validate()
                .is_err()
        );
        assert!(
            VariableLocationConfig::default()
                .with_unreferenced_qudits(UnreferencedQuditPolicy::DefaultRadix(1))
                .validate()
                .is_err()
        );
        assert!(matches!(
            VariableLocationConfig::from_json_str("{\"temperature\": -1.0}"),
            Err(IrError::InvalidConfig(_))
        ));
        assert!(VariableLocationConfig::from_json_str("not json").is_err());
    }
}
