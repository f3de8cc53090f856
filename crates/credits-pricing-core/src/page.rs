use crate::fetch::ModelSource;
use crate::selection::Selection;
use crate::view::{render, View};

/// User input the page reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Select(String),
    Retry,
}

/// The pricing page: owns the selection, borrows the model source.
#[derive(Debug, Clone, Default)]
pub struct PricingPage {
    selection: Selection,
}

impl PricingPage {
    pub fn new(selection: Selection) -> Self {
        Self { selection }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn view<S: ModelSource + ?Sized>(&self, source: &S) -> View {
        render(source.snapshot(), &self.selection)
    }

    /// Apply one event. A retry is forwarded to the source as a single
    /// refetch; any deduplication is the source's business.
    pub fn handle<S: ModelSource + ?Sized>(&mut self, event: Event, source: &mut S) {
        match event {
            Event::Select(id) => self.selection.select(id),
            Event::Retry => {
                tracing::info!("retrying model fetch");
                source.refetch();
            }
        }
    }
}
