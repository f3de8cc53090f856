use std::path::Path;

use reqwest::Client;

use crate::config::Config;
use crate::error::{PricingError, Result};
use crate::model::ModelsResponse;

const AVAILABLE_MODELS_PATH: &str = "/billing/available-models";

pub struct BillingClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl BillingClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.api_url.clone(), config.token.clone())
    }

    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {t}"))
    }

    pub fn models_url(&self) -> String {
        format!("{}{AVAILABLE_MODELS_PATH}", self.base_url)
    }

    /// Fetch the models the account may use, with pricing.
    pub async fn available_models(&self) -> Result<ModelsResponse> {
        let url = self.models_url();
        tracing::debug!(%url, "requesting available models");
        let mut req = self.http.get(&url);
        if let Some(auth) = self.auth_header() {
            req = req.header("Authorization", auth);
        }
        let resp = req.send().await?;
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(PricingError::Api { status, body });
        }
        let body = resp.text().await?;
        parse_models(&body)
    }
}

/// Parse an available-models payload.
pub fn parse_models(json: &str) -> Result<ModelsResponse> {
    Ok(serde_json::from_str(json)?)
}

/// Read an available-models payload saved to disk.
pub fn load_models_file(path: &Path) -> Result<ModelsResponse> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| PricingError::Io(format!("{}: {e}", path.display())))?;
    parse_models(&content)
}
