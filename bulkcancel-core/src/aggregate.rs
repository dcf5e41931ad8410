use crate::types::{Outcome, ResultSet};

/// Partitions outcomes into succeeded and failed buckets, keeping input order within each.
pub fn aggregate(outcomes: &[Outcome]) -> ResultSet {
    let mut set = ResultSet::default();
    for outcome in outcomes {
        if outcome.is_success() {
            set.succeeded.push(outcome.clone());
        } else {
            set.failed.push(outcome.clone());
        }
    }
    set
}

/// Owned variant of [`aggregate`] for callers that are done with the outcome list.
pub fn aggregate_owned(outcomes: Vec<Outcome>) -> ResultSet {
    let (succeeded, failed) = outcomes.into_iter().partition(Outcome::is_success);
    ResultSet { succeeded, failed }
}
