use crate::model::Model;

const TOKENS_PER_RATE_UNIT: f64 = 1_000_000.0;

/// USD cost of a task on `model`, unrounded.
///
/// Only eligible models should reach this. A model missing either rate costs
/// 0.0 and logs a warning; callers must not present that as a real figure.
pub fn cost(input_tokens: u64, output_tokens: u64, model: &Model) -> f64 {
    let Some(rates) = model.rates() else {
        tracing::warn!(model = %model.id, "cost requested for model without complete pricing");
        return 0.0;
    };
    let input_cost = (input_tokens as f64 / TOKENS_PER_RATE_UNIT) * rates.input;
    let output_cost = (output_tokens as f64 / TOKENS_PER_RATE_UNIT) * rates.output;
    input_cost + output_cost
}

/// "$11.64": dollar sign, exactly two decimals, half-cents rounded away
/// from zero.
pub fn format_usd(amount: f64) -> String {
    format!("${:.2}", round_half_cents(amount))
}

/// `{:.2}` rounds exact ties to even. A value sits exactly on a half cent
/// only when it is an odd number of eighths; those are nudged away from zero
/// here, everything else is left to the formatter.
fn round_half_cents(amount: f64) -> f64 {
    let eighths = amount * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        (amount * 100.0).round() / 100.0
    } else {
        amount
    }
}

/// Group digits in threes: 3410337 -> "3,410,337".
pub fn format_tokens(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_usd_rounds_to_cents() {
        assert_eq!(format_usd(11.635251), "$11.64");
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(3.0), "$3.00");
        assert_eq!(format_usd(0.004), "$0.00");
        assert_eq!(format_usd(1234.5), "$1234.50");
        assert_eq!(format_usd(0.125), "$0.13");
        assert_eq!(format_usd(-0.125), "$-0.13");
        assert_eq!(format_usd(0.375), "$0.38");
        assert_eq!(format_usd(0.25), "$0.25");
        assert_eq!(format_usd(1.005), "$1.00");
    }

    #[test]
    fn format_tokens_groups_thousands() {
        assert_eq!(format_tokens(0), "0");
        assert_eq!(format_tokens(999), "999");
        assert_eq!(format_tokens(3378), "3,378");
        assert_eq!(format_tokens(90_953), "90,953");
        assert_eq!(format_tokens(212_312), "212,312");
        assert_eq!(format_tokens(3_410_337), "3,410,337");
    }

    #[test]
    fn missing_rate_falls_back_to_zero() {
        let m = Model {
            id: "half".into(),
            display_name: "Half priced".into(),
            input_cost_per_million_tokens: Some(3.0),
            output_cost_per_million_tokens: None,
        };
        assert_eq!(cost(1_000_000, 1_000_000, &m), 0.0);
    }
}
