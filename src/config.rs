use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Register settings, typically read from a JSON file.
///
/// ```
/// use qsim_rs::config::SimConfig;
/// let config = SimConfig::from_json(r#"{"num_qubits": 3, "seed": 42}"#).unwrap();
/// assert_eq!(config.num_qubits, 3);
/// assert_eq!(config.seed, Some(42));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    pub num_qubits: usize,
    /// Seed for the measurement generator; entropy when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl SimConfig {
    pub fn new(num_qubits: usize) -> Self {
        SimConfig {
            num_qubits,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
