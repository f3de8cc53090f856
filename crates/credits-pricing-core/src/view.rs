use serde::Serialize;

use crate::cost::{cost, format_tokens, format_usd};
use crate::fetch::FetchSnapshot;
use crate::model::{eligible_models, Model};
use crate::selection::Selection;
use crate::tasks::{ExampleTask, Severity, EXAMPLE_TASKS};

pub const LOADING_LABEL: &str = "Loading pricing data...";
pub const ERROR_TITLE: &str = "Pricing Unavailable";
pub const ERROR_FALLBACK: &str = "Failed to fetch model pricing";
pub const RETRY_LABEL: &str = "Try Again";
pub const COST_PLACEHOLDER: &str = "Select model above";
pub const RATE_UNIT: &str = "per 1M tokens";

pub const PAGE_TITLE: &str = "Credits & Pricing";
pub const PAGE_SUBTITLE: &str = "Understand how credits work, explore pricing for AI models, \
     and find the right plan for your needs.";

pub const SELECTOR_PROMPT: &str = "Select a model to see pricing:";
pub const SELECTOR_PLACEHOLDER: &str = "Choose a model to calculate costs";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Panel {
    pub title: &'static str,
    pub body: &'static str,
}

pub const PANELS: [Panel; 3] = [
    Panel {
        title: "What are credits?",
        body: "Credits are our standard unit of measurement for platform usage - the more \
               complex or lengthy the task, the more credits it requires. Credits provide a \
               unified way to measure consumption across different types of AI operations \
               and computational resources.",
    },
    Panel {
        title: "How do credits work?",
        body: "Credits are consumed based on AI model usage. We apply a 50% markup over the \
               direct model provider costs. The specific credits consumption is determined by \
               the model used and the number of tokens processed (both input and output \
               tokens).",
    },
    Panel {
        title: "Usage Examples",
        body: "Here are some examples demonstrating credits consumption across different task \
               types and complexity levels.",
    },
];

pub const TABLE_TITLE: &str = "Compute Pricing by Model";
pub const TABLE_DESCRIPTION: &str = "Detailed pricing information for available AI models. \
     We apply a 50% markup on direct LLM provider costs to maintain our service and generate \
     profit.";

/// What the page shows for one snapshot of the model source.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum View {
    Loading {
        label: &'static str,
    },
    Error {
        title: &'static str,
        message: String,
        retry_label: &'static str,
    },
    Ready(Page),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub panels: [Panel; 3],
    pub selector: Selector,
    pub examples: Vec<TaskCard>,
    pub table: PricingTable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selector {
    pub prompt: &'static str,
    pub placeholder: &'static str,
    /// Selected id, even when it matches no option.
    pub value: String,
    pub options: Vec<SelectorOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectorOption {
    pub id: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskCard {
    pub name: &'static str,
    pub complexity: &'static str,
    pub severity: Severity,
    pub model_name: String,
    pub input_tokens: String,
    pub output_tokens: String,
    pub duration: &'static str,
    pub cost: CostCell,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CostCell {
    Amount { amount: f64, display: String },
    NoSelection { display: &'static str },
}

impl CostCell {
    pub fn display(&self) -> &str {
        match self {
            Self::Amount { display, .. } => display,
            Self::NoSelection { display } => display,
        }
    }

    pub fn amount(&self) -> Option<f64> {
        match self {
            Self::Amount { amount, .. } => Some(*amount),
            Self::NoSelection { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingTable {
    pub title: &'static str,
    pub description: &'static str,
    pub rows: Vec<PricingRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingRow {
    pub id: String,
    pub display_name: String,
    pub input: RateCell,
    pub output: RateCell,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateCell {
    pub rate: f64,
    pub display: String,
    pub unit: &'static str,
}

impl RateCell {
    fn new(rate: f64) -> Self {
        Self {
            rate,
            display: format_usd(rate),
            unit: RATE_UNIT,
        }
    }
}

/// Build the view for a snapshot. Loading wins over error, error over data.
pub fn render(snapshot: &FetchSnapshot, selection: &Selection) -> View {
    if snapshot.is_loading {
        return View::Loading {
            label: LOADING_LABEL,
        };
    }
    if let Some(failure) = &snapshot.error {
        return View::Error {
            title: ERROR_TITLE,
            message: failure
                .message
                .as_deref()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(ERROR_FALLBACK)
                .to_string(),
            retry_label: RETRY_LABEL,
        };
    }

    let models = snapshot.data.as_ref().map(|d| d.models.as_slice());
    View::Ready(render_page(&eligible_models(models), selection))
}

fn render_page(eligible: &[&Model], selection: &Selection) -> Page {
    let selected = selection.find(eligible);

    Page {
        title: PAGE_TITLE,
        subtitle: PAGE_SUBTITLE,
        panels: PANELS,
        selector: Selector {
            prompt: SELECTOR_PROMPT,
            placeholder: SELECTOR_PLACEHOLDER,
            value: selection.id().to_string(),
            options: eligible
                .iter()
                .map(|m| SelectorOption {
                    id: m.id.clone(),
                    label: m.display_name.clone(),
                    selected: selection.is_selected(m),
                })
                .collect(),
        },
        examples: EXAMPLE_TASKS
            .iter()
            .map(|t| task_card(t, selected))
            .collect(),
        table: PricingTable {
            title: TABLE_TITLE,
            description: TABLE_DESCRIPTION,
            rows: eligible
                .iter()
                .filter_map(|m| pricing_row(m, selection))
                .collect(),
        },
    }
}

fn task_card(task: &ExampleTask, selected: Option<&Model>) -> TaskCard {
    // Without a match the card keeps the model the run was recorded with.
    let (model_name, cost_cell) = match selected {
        Some(m) => {
            let amount = cost(task.input_tokens, task.output_tokens, m);
            (
                m.display_name.clone(),
                CostCell::Amount {
                    amount,
                    display: format_usd(amount),
                },
            )
        }
        None => (
            task.original_model.to_string(),
            CostCell::NoSelection {
                display: COST_PLACEHOLDER,
            },
        ),
    };

    TaskCard {
        name: task.name,
        complexity: task.complexity,
        severity: task.severity,
        model_name,
        input_tokens: format_tokens(task.input_tokens),
        output_tokens: format_tokens(task.output_tokens),
        duration: task.duration,
        cost: cost_cell,
    }
}

fn pricing_row(model: &Model, selection: &Selection) -> Option<PricingRow> {
    let rates = model.rates()?;
    Some(PricingRow {
        id: model.id.clone(),
        display_name: model.display_name.clone(),
        input: RateCell::new(rates.input),
        output: RateCell::new(rates.output),
        highlighted: selection.is_selected(model),
    })
}

impl View {
    pub fn page(&self) -> Option<&Page> {
        match self {
            Self::Ready(page) => Some(page),
            _ => None,
        }
    }
}
