use crate::model::Model;

/// Model preselected before the user picks one.
pub const DEFAULT_MODEL_ID: &str = "anthropic/claude-sonnet-4-20250514";

/// The model id the user has chosen.
///
/// Any string is accepted, including ids that are not (yet) in the model
/// list. Lookups go through [`Selection::find`] and treat a miss as
/// "nothing selected".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    id: String,
}

impl Default for Selection {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL_ID)
    }
}

impl Selection {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn select(&mut self, id: impl Into<String>) {
        self.id = id.into();
        tracing::debug!(model = %self.id, "model selected");
    }

    pub fn find<'a>(&self, eligible: &[&'a Model]) -> Option<&'a Model> {
        eligible.iter().copied().find(|m| m.id == self.id)
    }

    pub fn is_selected(&self, model: &Model) -> bool {
        model.id == self.id
    }

    /// Move to the neighbouring eligible model, wrapping at the ends.
    /// From an unknown id, forward lands on the first model and backward on
    /// the last.
    pub fn step(&mut self, eligible: &[&Model], forward: bool) {
        if eligible.is_empty() {
            return;
        }
        let n = eligible.len();
        let next = match eligible.iter().position(|m| m.id == self.id) {
            Some(i) if forward => (i + 1) % n,
            Some(i) => (i + n - 1) % n,
            None if forward => 0,
            None => n - 1,
        };
        self.select(eligible[next].id.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(id: &str) -> Model {
        Model {
            id: id.into(),
            display_name: id.to_uppercase(),
            input_cost_per_million_tokens: Some(1.0),
            output_cost_per_million_tokens: Some(2.0),
        }
    }

    #[test]
    fn defaults_to_sonnet() {
        assert_eq!(Selection::default().id(), DEFAULT_MODEL_ID);
    }

    #[test]
    fn select_accepts_unknown_ids() {
        let mut s = Selection::default();
        s.select("nope/not-a-model");
        assert_eq!(s.id(), "nope/not-a-model");
        let a = model("a");
        assert!(s.find(&[&a]).is_none());
    }

    #[test]
    fn find_matches_by_id() {
        let (a, b) = (model("a"), model("b"));
        let s = Selection::new("b");
        assert_eq!(s.find(&[&a, &b]).map(|m| m.id.as_str()), Some("b"));
        assert!(s.is_selected(&b));
        assert!(!s.is_selected(&a));
    }

    #[test]
    fn step_wraps_around() {
        let (a, b, c) = (model("a"), model("b"), model("c"));
        let list = [&a, &b, &c];
        let mut s = Selection::new("c");
        s.step(&list, true);
        assert_eq!(s.id(), "a");
        s.step(&list, false);
        assert_eq!(s.id(), "c");
    }

    #[test]
    fn step_from_unknown_id() {
        let (a, b) = (model("a"), model("b"));
        let mut s = Selection::new("zzz");
        s.step(&[&a, &b], false);
        assert_eq!(s.id(), "b");
        let mut s = Selection::new("zzz");
        s.step(&[&a, &b], true);
        assert_eq!(s.id(), "a");
        s.step(&[], true);
        assert_eq!(s.id(), "a");
    }
}
