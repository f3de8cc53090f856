use credits_pricing_core::cost::{cost, format_usd};
use credits_pricing_core::fetch::FetchSnapshot;
use credits_pricing_core::model::{Model, ModelsResponse};
use credits_pricing_core::selection::Selection;
use credits_pricing_core::tasks::EXAMPLE_TASKS;
use credits_pricing_core::view::render;

fn priced(id: &str, input: f64, output: f64) -> Model {
    Model {
        id: id.to_string(),
        display_name: id.to_uppercase(),
        input_cost_per_million_tokens: Some(input),
        output_cost_per_million_tokens: Some(output),
    }
}

fn sample_models() -> Vec<Model> {
    vec![
        priced("m1", 3.0, 15.0),
        priced("cheap", 0.1, 0.4),
        priced("pricey", 22.5, 112.5),
        priced("free", 0.0, 0.0),
    ]
}

#[test]
fn zero_tokens_cost_nothing() {
    for m in sample_models() {
        assert_eq!(cost(0, 0, &m), 0.0, "{}", m.id);
    }
}

#[test]
fn one_million_tokens_cost_the_rate() {
    for m in sample_models() {
        let rates = m.rates().unwrap();
        assert_eq!(cost(1_000_000, 0, &m), rates.input, "{} input", m.id);
        assert_eq!(cost(0, 1_000_000, &m), rates.output, "{} output", m.id);
    }
}

#[test]
fn social_automation_on_m1() {
    let m = priced("m1", 3.0, 15.0);
    let c = cost(3_410_337, 93_616, &m);
    assert!((c - 11.635251).abs() < 1e-9, "got {c}");
    assert_eq!(format_usd(c), "$11.64");
}

#[test]
fn cost_is_linear_in_tokens() {
    let m = priced("m1", 3.0, 15.0);
    let single = cost(100_000, 10_000, &m);
    let double = cost(200_000, 20_000, &m);
    assert!((double - 2.0 * single).abs() < 1e-12);
}

#[test]
fn example_tasks_on_m1() {
    let m = priced("m1", 3.0, 15.0);
    let shown: Vec<String> = EXAMPLE_TASKS
        .iter()
        .map(|t| format_usd(cost(t.input_tokens, t.output_tokens, &m)))
        .collect();
    assert_eq!(
        shown,
        vec!["$11.64", "$0.69", "$1.28", "$0.53", "$1.34", "$2.18"]
    );
}

#[test]
fn half_cent_rates_round_up() {
    assert_eq!(format_usd(0.125), "$0.13");
    assert_eq!(format_usd(2.625), "$2.63");
    assert_eq!(format_usd(1.75 * 1.5), "$2.63");
}

#[test]
fn pricing_table_rounds_half_cent_rates_up() {
    let resp = ModelsResponse {
        models: vec![priced("marked-up", 0.125, 2.625)],
    };
    let view = render(&FetchSnapshot::ready(resp), &Selection::new("marked-up"));
    let row = &view.page().expect("ready view").table.rows[0];
    assert_eq!(row.input.display, "$0.13");
    assert_eq!(row.output.display, "$2.63");
}
