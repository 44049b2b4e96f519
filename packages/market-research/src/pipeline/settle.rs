//! Run independent operations concurrently and keep every outcome.
//!
//! Unlike `try_join_all`, one rejected branch does not cancel or hide the
//! others; callers decide afterwards what a partial result means.

use futures::future::join_all;
use std::future::Future;

/// Per-branch outcomes in input order.
#[derive(Debug)]
pub struct Settled<T, E> {
    outcomes: Vec<Result<T, E>>,
}

impl<T, E> Settled<T, E> {
    pub fn outcomes(&self) -> &[Result<T, E>] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn fulfilled_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ok()).count()
    }

    /// True when there was at least one branch and every branch failed.
    pub fn all_rejected(&self) -> bool {
        !self.outcomes.is_empty() && self.outcomes.iter().all(|o| o.is_err())
    }

    pub fn first_error(&self) -> Option<&E> {
        self.outcomes.iter().find_map(|o| o.as_ref().err())
    }

    /// Split into values and errors, each in input order.
    pub fn into_parts(self) -> (Vec<T>, Vec<E>) {
        let mut values = Vec::new();
        let mut errors = Vec::new();
        for outcome in self.outcomes {
            match outcome {
                Ok(value) => values.push(value),
                Err(err) => errors.push(err),
            }
        }
        (values, errors)
    }

    pub fn into_outcomes(self) -> Vec<Result<T, E>> {
        self.outcomes
    }
}

/// Await all futures, capturing each success or failure.
pub async fn settle_all<I, F, T, E>(futures: I) -> Settled<T, E>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, E>>,
{
    Settled {
        outcomes: join_all(futures).await,
    }
}
