//! Default implementation of the [`Evaluator`] trait.
use super::Evaluator;
use crate::{record::Record, Env, Policy};
use anyhow::Result;
use log::trace;

/// Runs a fixed number of episodes and reports the average return.
///
/// Each episode resets the environment with a unique index via
/// [`Env::reset_with_index`], so evaluation runs are reproducible.
pub struct DefaultEvaluator<E: Env> {
    /// The number of episodes to run during evaluation.
    n_episodes: usize,

    /// The environment instance used for evaluation.
    env: E,
}

impl<E: Env> DefaultEvaluator<E> {
    /// Constructs an evaluator with an environment built from `config`.
    ///
    /// `seed` is the seed of the environment; each episode additionally
    /// reseeds the environment with the episode index.
    pub fn new(config: &E::Config, seed: i64, n_episodes: usize) -> Result<Self> {
        Ok(Self {
            n_episodes,
            env: E::build(config, seed)?,
        })
    }
}

impl<E: Env> Evaluator<E> for DefaultEvaluator<E> {
    fn evaluate<P: Policy<E>>(&mut self, policy: &mut P) -> Result<Record> {
        let mut r_total = 0f32;

        for ix in 0..self.n_episodes {
            trace!("DefaultEvaluator: episode {}", ix);
            let mut prev_obs = self.env.reset_with_index(ix)?;

            loop {
                let act = policy.sample(&prev_obs);
                let (step, _) = self.env.step(&act);
                r_total += step.reward[0];
                if step.is_done() {
                    break;
                }
                prev_obs = step.obs;
            }
        }

        let name = "Episode return";
        Ok(Record::from_scalar(name, r_total / self.n_episodes as f32))
    }
}
