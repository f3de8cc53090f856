use std::path::PathBuf;

use clap::{Parser, Subcommand};
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::{Key, Style, Term};
use credits_pricing_core::{
    api::{self, BillingClient},
    config::{self, Config},
    cost::{cost, format_usd},
    fetch::{ModelSource, ModelsQuery},
    model::{eligible_models, ModelsResponse},
    page::{Event, PricingPage},
    selection::Selection,
    tasks::Severity,
    view::{CostCell, Page, PricingRow, View},
};
use tracing_subscriber::EnvFilter;

// ── Palette ──────────────────────────────────────────────────────────

fn s_header() -> Style { Style::new().color256(252).bold() }  // bright gray, bold
fn s_dim() -> Style    { Style::new().color256(248) }         // light gray
fn s_tree() -> Style   { Style::new().color256(245) }         // mid gray
fn s_hint() -> Style   { Style::new().color256(243) }         // soft gray
fn s_err() -> Style    { Style::new().color256(167) }         // red
fn s_price() -> Style  { Style::new().color256(109) }         // teal
fn s_accent() -> Style { Style::new().color256(111) }         // blue
fn s_label() -> Style  { Style::new().color256(146) }         // muted lavender

const WIDTH: usize = 72;

fn sep(width: usize) -> String {
    s_tree().apply_to("\u{2500}".repeat(width)).to_string()
}

/// Greedy word wrap, indented by two spaces.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.len() + 1 + word.len() > width {
            lines.push(format!("  {line}"));
            line.clear();
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(format!("  {line}"));
    }
    lines
}

// ── CLI Args ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "credits-pricing",
    about = "Explain credits, compare model pricing, estimate example task costs",
    version,
    after_help = "examples:\n  \
        credits-pricing                                  (interactive page)\n  \
        credits-pricing --model openai/gpt-4o\n  \
        credits-pricing --file models.json --json\n  \
        credits-pricing models\n  \
        credits-pricing cost 3410337 93616 --model anthropic/claude-sonnet-4-20250514"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Model to select initially.
    #[arg(long, short, global = true)]
    model: Option<String>,

    /// Read the available-models payload from a JSON file instead of the API.
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// Billing API base URL.
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Bearer token for the billing API.
    #[arg(long, global = true)]
    token: Option<String>,

    /// Print the page as JSON.
    #[arg(long, short)]
    json: bool,

    /// Increase verbosity (-v, -vv, -vvv).
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Per-million-token pricing of every priced model.
    Models,
    /// Cost of a single run.
    Cost {
        input_tokens: u64,
        output_tokens: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = resolve_config(&cli)?;
    let loader = match &cli.file {
        Some(path) => Loader::File(path.clone()),
        None => Loader::Api(BillingClient::from_config(&config)?),
    };
    let selected = cli.model.clone().unwrap_or(config.default_model);

    match cli.command {
        Some(Commands::Models) => cmd_models(&loader, &selected).await?,
        Some(Commands::Cost {
            input_tokens,
            output_tokens,
        }) => cmd_cost(&loader, &selected, input_tokens, output_tokens).await?,
        None => cmd_page(&loader, Selection::new(selected), cli.json).await?,
    }
    Ok(())
}

fn crate_directives(level: &str) -> String {
    format!("credits_pricing={level},credits_pricing_core={level}")
}

/// Filter directives: `-v` counts beat `RUST_LOG`, which beats `warn`.
fn log_directives(verbose: u8, rust_log: Option<&str>) -> String {
    match (verbose, rust_log) {
        (0, Some(env)) if !env.trim().is_empty() => env.to_string(),
        (0, _) => crate_directives("warn"),
        (1, _) => crate_directives("info"),
        (2, _) => crate_directives("debug"),
        _ => crate_directives("trace"),
    }
}

fn init_tracing(verbose: u8) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directives = log_directives(verbose, rust_log.as_deref());
    let filter = EnvFilter::try_new(&directives)
        .unwrap_or_else(|_| EnvFilter::new(crate_directives("warn")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .init();
}

fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = config::load_config_auto()?;
    if let Some(url) = &cli.api_url {
        config.api_url = url.clone();
    }
    if let Some(token) = &cli.token {
        config.token = Some(token.clone());
    }
    tracing::debug!(api_url = %config.api_url, "config resolved");
    Ok(config)
}

// ── Loading ──────────────────────────────────────────────────────────

enum Loader {
    Api(BillingClient),
    File(PathBuf),
}

impl Loader {
    async fn load(&self) -> credits_pricing_core::error::Result<ModelsResponse> {
        match self {
            Self::Api(client) => client.available_models().await,
            Self::File(path) => api::load_models_file(path),
        }
    }
}

/// The progress line rewrites the terminal, so only draw it on a tty and
/// never into JSON output.
fn progress_enabled(json: bool, stderr_is_term: bool) -> bool {
    !json && stderr_is_term
}

/// Run the outstanding fetch, if any, with a transient progress line.
async fn settle(query: &mut ModelsQuery, loader: &Loader, show_progress: bool) -> anyhow::Result<()> {
    if !query.take_pending() {
        return Ok(());
    }
    let term = Term::stderr();
    if show_progress {
        term.write_line(&format!(
            "{}",
            s_dim().apply_to(format!("\u{22ef} {}", credits_pricing_core::view::LOADING_LABEL))
        ))?;
    }
    let result = loader.load().await;
    if show_progress {
        term.clear_last_lines(1)?;
    }
    query.resolve(result);
    Ok(())
}

/// Fetch once and fail hard on error; for the one-shot subcommands.
async fn fetch_models(loader: &Loader) -> anyhow::Result<ModelsResponse> {
    let mut query = ModelsQuery::new();
    settle(&mut query, loader, progress_enabled(false, Term::stderr().is_term())).await?;
    let snap = query.snapshot();
    if let Some(failure) = &snap.error {
        let msg = failure
            .message
            .as_deref()
            .unwrap_or(credits_pricing_core::view::ERROR_FALLBACK);
        anyhow::bail!("{msg}");
    }
    Ok(snap.data.clone().unwrap_or_default())
}

// ── Page ─────────────────────────────────────────────────────────────

async fn cmd_page(loader: &Loader, selection: Selection, json: bool) -> anyhow::Result<()> {
    let out = Term::stdout();
    let interactive = out.is_term() && Term::stderr().is_term() && !json;

    let mut query = ModelsQuery::new();
    let mut page = PricingPage::new(selection);
    let mut drawn = 0usize;

    loop {
        settle(&mut query, loader, progress_enabled(json, Term::stderr().is_term())).await?;
        let view = page.view(&query);

        if json {
            println!("{}", serde_json::to_string_pretty(&view)?);
            return Ok(());
        }

        let mut lines = view_lines(&view);
        if interactive {
            lines.push(String::new());
            lines.push(key_hints(&view));
        }
        if drawn > 0 {
            out.clear_last_lines(drawn)?;
        }
        for line in &lines {
            out.write_line(line)?;
        }
        drawn = lines.len();

        if !interactive {
            return Ok(());
        }

        let key = {
            let t = Term::stderr();
            tokio::task::spawn_blocking(move || t.read_key()).await?
        }?;

        match key {
            Key::ArrowUp | Key::Char('k') | Key::ArrowDown | Key::Char('j') => {
                let forward = matches!(key, Key::ArrowDown | Key::Char('j'));
                let models = query.snapshot().data.as_ref().map(|d| d.models.as_slice());
                let mut next = page.selection().clone();
                next.step(&eligible_models(models), forward);
                if next != *page.selection() {
                    page.handle(Event::Select(next.id().to_string()), &mut query);
                }
            }
            Key::Char('r') if matches!(view, View::Error { .. }) => {
                page.handle(Event::Retry, &mut query);
            }
            Key::Escape | Key::Char('q') | Key::Char('\u{3}') => {
                out.clear_last_lines(2)?;
                break;
            }
            _ => {}
        }
    }

    Ok(())
}

fn key_hints(view: &View) -> String {
    let hint = match view {
        View::Ready(_) => "\u{2191}/\u{2193} change model  \u{00b7}  q quit",
        View::Error { .. } => "r try again  \u{00b7}  q quit",
        View::Loading { .. } => "q quit",
    };
    format!("  {}", s_hint().apply_to(hint))
}

fn view_lines(view: &View) -> Vec<String> {
    match view {
        View::Loading { label } => vec![format!("  {}", s_dim().apply_to(format!("\u{22ef} {label}")))],
        View::Error {
            title,
            message,
            retry_label,
        } => vec![
            String::new(),
            format!("  {}", s_err().apply_to(format!("\u{2717} {title}"))),
            format!("  {}", s_dim().apply_to(message)),
            format!("  {}", s_hint().apply_to(format!("[{retry_label}]"))),
            String::new(),
        ],
        View::Ready(page) => page_lines(page),
    }
}

fn page_lines(page: &Page) -> Vec<String> {
    let mut lines = vec![String::new()];
    lines.push(format!("{}", s_header().apply_to(page.title)));
    lines.extend(wrap(page.subtitle, WIDTH).into_iter().map(|l| s_dim().apply_to(l).to_string()));
    lines.push(sep(WIDTH));

    for panel in &page.panels {
        lines.push(String::new());
        lines.push(format!("{}", s_accent().apply_to(panel.title)));
        lines.extend(wrap(panel.body, WIDTH).into_iter().map(|l| s_dim().apply_to(l).to_string()));
    }

    // Selector
    lines.push(String::new());
    lines.push(format!("  {}", s_label().apply_to(page.selector.prompt)));
    if !page.selector.options.iter().any(|o| o.selected) {
        lines.push(format!("    {}", s_hint().apply_to(page.selector.placeholder)));
    }
    for opt in &page.selector.options {
        if opt.selected {
            lines.push(format!("  {}", s_accent().bold().apply_to(format!("\u{25b8} {}", opt.label))));
        } else {
            lines.push(format!("    {}", s_dim().apply_to(&opt.label)));
        }
    }

    // Example grid
    lines.push(String::new());
    let mut table = Table::new();
    table.load_preset(presets::NOTHING);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("  Task").fg(Color::AnsiValue(243)),
        Cell::new("Complexity").fg(Color::AnsiValue(243)),
        Cell::new("Model").fg(Color::AnsiValue(243)),
        Cell::new("Input Tokens").fg(Color::AnsiValue(243)),
        Cell::new("Output Tokens").fg(Color::AnsiValue(243)),
        Cell::new("Cost").fg(Color::AnsiValue(243)),
    ]);
    for card in &page.examples {
        let severity_c = match card.severity {
            Severity::Destructive => Color::AnsiValue(167),
            Severity::Secondary => Color::AnsiValue(248),
        };
        let cost_c = match card.cost {
            CostCell::Amount { .. } => Color::AnsiValue(109),
            CostCell::NoSelection { .. } => Color::AnsiValue(243),
        };
        table.add_row(vec![
            Cell::new(format!("  {}", card.name)).fg(Color::AnsiValue(252)),
            Cell::new(card.complexity).fg(severity_c),
            Cell::new(&card.model_name).fg(Color::AnsiValue(146)),
            Cell::new(&card.input_tokens).fg(Color::AnsiValue(248)),
            Cell::new(&card.output_tokens).fg(Color::AnsiValue(248)),
            Cell::new(card.cost.display()).fg(cost_c),
        ]);
    }
    lines.extend(table.to_string().lines().map(String::from));

    // Pricing table
    lines.push(String::new());
    lines.push(sep(WIDTH));
    lines.push(format!("{}", s_header().apply_to(page.table.title)));
    lines.extend(wrap(page.table.description, WIDTH).into_iter().map(|l| s_dim().apply_to(l).to_string()));
    lines.push(String::new());
    lines.extend(pricing_table(&page.table.rows).lines().map(String::from));
    lines.push(String::new());
    lines
}

fn pricing_table(rows: &[PricingRow]) -> String {
    if rows.is_empty() {
        return format!("  {}", s_hint().apply_to("no priced models available"));
    }
    let mut table = Table::new();
    table.load_preset(presets::NOTHING);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("  Model").fg(Color::AnsiValue(243)),
        Cell::new("Input Cost").fg(Color::AnsiValue(243)),
        Cell::new("Output Cost").fg(Color::AnsiValue(243)),
    ]);
    for row in rows {
        let (marker, name_c) = if row.highlighted {
            ("\u{258c} ", Color::AnsiValue(111))
        } else {
            ("  ", Color::AnsiValue(252))
        };
        table.add_row(vec![
            Cell::new(format!("{marker}{}", row.display_name)).fg(name_c),
            Cell::new(format!("{} {}", row.input.display, row.input.unit)).fg(Color::AnsiValue(109)),
            Cell::new(format!("{} {}", row.output.display, row.output.unit)).fg(Color::AnsiValue(109)),
        ]);
    }
    table.to_string()
}

// ── Models ───────────────────────────────────────────────────────────

async fn cmd_models(loader: &Loader, selected: &str) -> anyhow::Result<()> {
    let resp = fetch_models(loader).await?;
    let page = credits_pricing_core::view::render(
        &credits_pricing_core::FetchSnapshot::ready(resp),
        &Selection::new(selected),
    );
    let Some(page) = page.page() else {
        return Ok(());
    };

    println!();
    println!("{}", s_header().apply_to(page.table.title));
    println!("{}", sep(WIDTH));
    println!("{}", pricing_table(&page.table.rows));
    println!();
    Ok(())
}

// ── Cost ─────────────────────────────────────────────────────────────

async fn cmd_cost(
    loader: &Loader,
    selected: &str,
    input_tokens: u64,
    output_tokens: u64,
) -> anyhow::Result<()> {
    let resp = fetch_models(loader).await?;
    let eligible = eligible_models(Some(resp.models.as_slice()));
    let model = Selection::new(selected)
        .find(&eligible)
        .ok_or_else(|| anyhow::anyhow!("no priced model with id '{selected}'"))?;

    let amount = cost(input_tokens, output_tokens, model);
    println!(
        "{}  {}",
        s_price().apply_to(format_usd(amount)),
        s_dim().apply_to(format!(
            "{} \u{00b7} {} in / {} out",
            model.display_name,
            credits_pricing_core::cost::format_tokens(input_tokens),
            credits_pricing_core::cost::format_tokens(output_tokens),
        ))
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_only_on_terminal_without_json() {
        assert!(progress_enabled(false, true));
        assert!(!progress_enabled(false, false));
        assert!(!progress_enabled(true, true));
        assert!(!progress_enabled(true, false));
    }

    #[test]
    fn rust_log_applies_without_verbosity() {
        assert_eq!(log_directives(0, Some("credits_pricing_core=debug")), "credits_pricing_core=debug");
        assert_eq!(log_directives(0, None), crate_directives("warn"));
        assert_eq!(log_directives(0, Some("  ")), crate_directives("warn"));
    }

    #[test]
    fn verbosity_overrides_rust_log() {
        assert_eq!(log_directives(1, Some("error")), crate_directives("info"));
        assert_eq!(log_directives(2, Some("error")), crate_directives("debug"));
        assert_eq!(log_directives(3, None), crate_directives("trace"));
        assert_eq!(log_directives(7, Some("off")), crate_directives("trace"));
    }

    #[test]
    fn wrap_respects_width() {
        let lines = wrap("alpha beta gamma delta", 11);
        assert_eq!(lines, vec!["  alpha beta", "  gamma delta"]);
    }

    #[test]
    fn wrap_keeps_long_words_whole() {
        let lines = wrap("supercalifragilistic x", 5);
        assert_eq!(lines, vec!["  supercalifragilistic", "  x"]);
    }

    #[test]
    fn error_view_lines_show_message_and_retry() {
        let view = View::Error {
            title: "Pricing Unavailable",
            message: "API error (HTTP 500): oops".into(),
            retry_label: "Try Again",
        };
        let text = console::strip_ansi_codes(&view_lines(&view).join("\n")).to_string();
        assert!(text.contains("Pricing Unavailable"));
        assert!(text.contains("API error (HTTP 500): oops"));
        assert!(text.contains("[Try Again]"));
    }

    #[test]
    fn page_lines_mark_selected_row() {
        let resp = ModelsResponse {
            models: vec![credits_pricing_core::Model {
                id: "m1".into(),
                display_name: "Model One".into(),
                input_cost_per_million_tokens: Some(3.0),
                output_cost_per_million_tokens: Some(15.0),
            }],
        };
        let view = credits_pricing_core::view::render(
            &credits_pricing_core::FetchSnapshot::ready(resp),
            &Selection::new("m1"),
        );
        let text = console::strip_ansi_codes(&view_lines(&view).join("\n")).to_string();
        assert!(text.contains("\u{25b8} Model One"));
        assert!(text.contains("\u{258c} Model One"));
        assert!(text.contains("$11.64"));
        assert!(text.contains("$3.00 per 1M tokens"));
    }
}
