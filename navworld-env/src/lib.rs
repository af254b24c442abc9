#![warn(missing_docs)]
//! Navigable world environments adapted to the [`navworld_core`] interface.
//!
//! [`NavWorldEnv`] wraps a simulated world implementing the
//! [`World`](world::World) trait and presents it as a
//! [`navworld_core::Env`]. Observations are normalized into the canonical
//! dictionary shape of [`NavWorldObs`]: the RGB frame is resized to a fixed
//! target size with nearest-neighbor interpolation and emitted under a
//! configurable key, the episode flags `is_first` / `is_last` / `is_terminal`
//! are injected, and any other entries of a dictionary-shaped native
//! observation pass through unmodified.
//!
//! Worlds registered with [`world::make_world`] are built by identifier
//! through the environment configuration. Here is an example of running the
//! built-in hallway world with a random policy.
//!
//! ```no_run
//! use anyhow::Result;
//! use navworld_core::{DefaultEvaluator, Evaluator as _, Policy};
//! use navworld_env::{
//!     NavWorldAct, NavWorldActRawFilter, NavWorldEnv, NavWorldEnvConfig, NavWorldObs,
//!     NavWorldObsRawFilter,
//! };
//!
//! type Obs = NavWorldObs;
//! type Act = NavWorldAct;
//! type ObsFilter = NavWorldObsRawFilter<Obs>;
//! type ActFilter = NavWorldActRawFilter<Act>;
//! type EnvConfig = NavWorldEnvConfig<Obs, Act, ObsFilter, ActFilter>;
//! type Env = NavWorldEnv<Obs, Act, ObsFilter, ActFilter>;
//!
//! struct RandomPolicy;
//!
//! impl Policy<Env> for RandomPolicy {
//!     fn sample(&mut self, _: &Obs) -> Act {
//!         fastrand::i64(0..3).into()
//!     }
//! }
//!
//! fn main() -> Result<()> {
//!     env_logger::Builder::from_env(
//!         env_logger::Env::default().default_filter_or("info"),
//!     )
//!     .init();
//!     fastrand::seed(42);
//!
//!     // Creates the hallway environment
//!     let env_config = EnvConfig::default().name("Hallway-v0");
//!
//!     // Runs evaluation with a random policy
//!     let mut policy = RandomPolicy;
//!     let record = DefaultEvaluator::<Env>::new(&env_config, 0, 5)?.evaluate(&mut policy)?;
//!     println!("{:?}", record.get_scalar("Episode return"));
//!
//!     Ok(())
//! }
//! ```
mod act;
mod env;
mod error;
mod obs;
pub mod util;
pub mod world;
pub use act::{NavWorldAct, NavWorldActFilter, NavWorldActRawFilter, NavWorldActRawFilterConfig};
pub use env::{NavWorldEnv, NavWorldEnvConfig, NavWorldInfo};
pub use error::NavWorldError;
pub use obs::{NavWorldObs, NavWorldObsFilter, NavWorldObsRawFilter, NavWorldObsRawFilterConfig};
