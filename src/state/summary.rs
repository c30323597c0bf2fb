use std::rc::Rc;
use yew::Reducible;

use crate::models::Summary;

pub const SUMMARY_REJECTED: &str = "Failed to fetch summary.";
pub const SUMMARY_UNREACHABLE: &str = "Error connecting to the backend fetching summary dashboard.";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SummaryState {
    pub summary: Option<Summary>,
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SummaryAction {
    Loaded(Summary),
    Failed(String),
}

impl Reducible for SummaryState {
    type Action = SummaryAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = match action {
            SummaryAction::Loaded(summary) => SummaryState {
                summary: Some(summary),
                error: None,
            },
            SummaryAction::Failed(message) => SummaryState {
                summary: self.summary.clone(),
                error: Some(message),
            },
        };
        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn summary() -> Summary {
        Summary {
            total_monthly_cost: 30.0,
            total_annual_cost: 360.0,
            cost_by_category: BTreeMap::from([("Streaming".to_string(), 30.0)]),
        }
    }

    #[test]
    fn loaded_stores_summary() {
        let state = Rc::new(SummaryState::default()).reduce(SummaryAction::Loaded(summary()));
        assert_eq!(state.summary, Some(summary()));
        assert_eq!(state.error, None);
    }

    #[test]
    fn failure_sets_error() {
        let state = Rc::new(SummaryState::default())
            .reduce(SummaryAction::Failed(SUMMARY_REJECTED.to_string()));
        assert_eq!(state.summary, None);
        assert_eq!(state.error.as_deref(), Some(SUMMARY_REJECTED));
    }
}
