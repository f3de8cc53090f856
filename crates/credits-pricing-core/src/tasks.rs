use serde::Serialize;

/// How a complexity badge is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Secondary,
    Destructive,
}

/// A recorded agent run, used to illustrate credit consumption.
#[derive(Debug, Clone, Serialize)]
pub struct ExampleTask {
    pub name: &'static str,
    pub complexity: &'static str,
    pub severity: Severity,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub duration: &'static str,
    /// Model the run was recorded with.
    pub original_model: &'static str,
}

const COMPLEX: &str = "Complex";
const STANDARD: &str = "Standard Complexity";

pub const EXAMPLE_TASKS: &[ExampleTask] = &[
    ExampleTask {
        name: "Social Automation System",
        complexity: COMPLEX,
        severity: Severity::Destructive,
        input_tokens: 3_410_337,
        output_tokens: 93_616,
        duration: "35 minutes",
        original_model: "claude-sonnet-4",
    },
    ExampleTask {
        name: "Content Marketing Strategy",
        complexity: STANDARD,
        severity: Severity::Secondary,
        input_tokens: 212_312,
        output_tokens: 3_378,
        duration: "11 minutes",
        original_model: "claude-sonnet-4",
    },
    ExampleTask {
        name: "Go-to-Market Strategy",
        complexity: STANDARD,
        severity: Severity::Secondary,
        input_tokens: 307_719,
        output_tokens: 24_033,
        duration: "16 minutes",
        original_model: "claude-sonnet-4",
    },
    ExampleTask {
        name: "Learning Path Generator",
        complexity: STANDARD,
        severity: Severity::Secondary,
        input_tokens: 90_953,
        output_tokens: 17_472,
        duration: "5 minutes",
        original_model: "claude-sonnet-4",
    },
    ExampleTask {
        name: "Customer Journey Mapping",
        complexity: COMPLEX,
        severity: Severity::Destructive,
        input_tokens: 360_013,
        output_tokens: 17_287,
        duration: "20 minutes",
        original_model: "claude-sonnet-4",
    },
    ExampleTask {
        name: "Sales Funnel Optimization",
        complexity: COMPLEX,
        severity: Severity::Destructive,
        input_tokens: 559_918,
        output_tokens: 33_392,
        duration: "14 minutes",
        original_model: "claude-sonnet-4",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_tasks_with_unique_names() {
        assert_eq!(EXAMPLE_TASKS.len(), 6);
        for (i, a) in EXAMPLE_TASKS.iter().enumerate() {
            for b in &EXAMPLE_TASKS[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn severity_matches_complexity_label() {
        for t in EXAMPLE_TASKS {
            let expected = if t.complexity == COMPLEX {
                Severity::Destructive
            } else {
                Severity::Secondary
            };
            assert_eq!(t.severity, expected, "{}", t.name);
            assert!(t.input_tokens > t.output_tokens, "{}: input should dominate", t.name);
        }
    }
}
