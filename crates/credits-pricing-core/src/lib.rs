#[cfg(feature = "network")]
pub mod api;
pub mod config;
pub mod cost;
pub mod error;
pub mod fetch;
pub mod model;
pub mod page;
pub mod selection;
pub mod tasks;
pub mod view;

pub use error::PricingError;
pub use fetch::{FetchFailure, FetchSnapshot, ModelSource, ModelsQuery};
pub use model::{eligible_models, Model, ModelsResponse};
pub use page::{Event, PricingPage};
pub use selection::{Selection, DEFAULT_MODEL_ID};
pub use view::View;
