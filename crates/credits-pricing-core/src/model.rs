use serde::{Deserialize, Serialize};

/// A model as reported by the billing API.
///
/// Costs are USD per million tokens and already include the platform markup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub input_cost_per_million_tokens: Option<f64>,
    #[serde(default)]
    pub output_cost_per_million_tokens: Option<f64>,
}

/// Payload of the available-models endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelsResponse {
    #[serde(default)]
    pub models: Vec<Model>,
}

/// Both per-million-token rates of an eligible model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rates {
    pub input: f64,
    pub output: f64,
}

impl Model {
    /// Rates, if both are present.
    pub fn rates(&self) -> Option<Rates> {
        Some(Rates {
            input: self.input_cost_per_million_tokens?,
            output: self.output_cost_per_million_tokens?,
        })
    }

    pub fn is_eligible(&self) -> bool {
        self.rates().is_some()
    }
}

/// Keep only models that carry both input and output pricing, in their
/// original order. A missing list is treated as empty.
pub fn eligible_models(models: Option<&[Model]>) -> Vec<&Model> {
    let models = models.unwrap_or_default();
    let eligible: Vec<&Model> = models.iter().filter(|m| m.is_eligible()).collect();
    if eligible.len() < models.len() {
        tracing::debug!(
            excluded = models.len() - eligible.len(),
            "skipping models without complete pricing"
        );
    }
    eligible
}
