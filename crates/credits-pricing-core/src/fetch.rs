use serde::{Deserialize, Serialize};

use crate::error::{PricingError, Result};
use crate::model::ModelsResponse;

/// A failed fetch as the page sees it.
///
/// `message` is `None` when the failure carried no usable text; the page
/// then shows a generic line instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FetchFailure {
    #[serde(default)]
    pub message: Option<String>,
}

impl From<&PricingError> for FetchFailure {
    fn from(e: &PricingError) -> Self {
        let text = e.to_string();
        Self {
            message: (!text.trim().is_empty()).then_some(text),
        }
    }
}

/// Latest observed state of the model source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FetchSnapshot {
    #[serde(default)]
    pub data: Option<ModelsResponse>,
    #[serde(default)]
    pub is_loading: bool,
    #[serde(default)]
    pub error: Option<FetchFailure>,
}

impl FetchSnapshot {
    pub fn loading() -> Self {
        Self {
            is_loading: true,
            ..Self::default()
        }
    }

    pub fn failed(failure: FetchFailure) -> Self {
        Self {
            error: Some(failure),
            ..Self::default()
        }
    }

    pub fn ready(data: ModelsResponse) -> Self {
        Self {
            data: Some(data),
            ..Self::default()
        }
    }
}

/// Where the page gets its models from.
///
/// The page only reads the latest snapshot and asks for a refetch; request
/// lifecycle, deduplication and transport belong to the implementor.
pub trait ModelSource {
    fn snapshot(&self) -> &FetchSnapshot;
    fn refetch(&mut self);
}

/// In-memory query state for a model source driven by an outside loader.
///
/// The driver polls [`ModelsQuery::take_pending`], performs the load however
/// it likes, and hands the outcome to [`ModelsQuery::resolve`].
#[derive(Debug)]
pub struct ModelsQuery {
    state: FetchSnapshot,
    pending: bool,
    attempts: u32,
}

impl Default for ModelsQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelsQuery {
    /// Starts loading with a fetch already requested.
    pub fn new() -> Self {
        Self {
            state: FetchSnapshot::loading(),
            pending: true,
            attempts: 0,
        }
    }

    /// Claim the outstanding fetch request, if any. Returns true once per
    /// request no matter how often `refetch` was called before it.
    pub fn take_pending(&mut self) -> bool {
        if !self.pending {
            return false;
        }
        self.pending = false;
        self.attempts += 1;
        tracing::debug!(attempt = self.attempts, "fetching models");
        true
    }

    pub fn resolve(&mut self, result: Result<ModelsResponse>) {
        self.state = match result {
            Ok(data) => {
                tracing::debug!(models = data.models.len(), "models loaded");
                FetchSnapshot::ready(data)
            }
            Err(e) => {
                tracing::debug!(error = %e, "model fetch failed");
                FetchSnapshot::failed(FetchFailure::from(&e))
            }
        };
    }

    /// Number of fetches started so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}

impl ModelSource for ModelsQuery {
    fn snapshot(&self) -> &FetchSnapshot {
        &self.state
    }

    fn refetch(&mut self) {
        self.state = FetchSnapshot::loading();
        self.pending = true;
    }
}
