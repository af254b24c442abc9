//! Evaluate a [`Policy`].
use crate::{record::Record, Env, Policy};
use anyhow::Result;
mod default_evaluator;
pub use default_evaluator::DefaultEvaluator;

/// Evaluate a [`Policy`].
pub trait Evaluator<E: Env> {
    /// Runs evaluation episodes and returns a [`Record`] of the outcome.
    fn evaluate<P: Policy<E>>(&mut self, policy: &mut P) -> Result<Record>;
}
