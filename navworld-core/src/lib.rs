#![warn(missing_docs)]
//! Core abstractions shared by navworld environments and their callers.
//!
//! This crate defines the vocabulary of an environment interaction:
//! observations ([`Obs`]), actions ([`Act`]), environments ([`Env`]) emitting
//! [`Step`] objects, and the [`Record`](record::Record) container carrying
//! per-step diagnostics. It also provides the observation/action space model
//! ([`spaces`]) and a [`DefaultEvaluator`] that runs a [`Policy`] for a number
//! of episodes.
pub mod error;
pub mod record;
pub mod spaces;

mod base;
pub use base::{Act, Env, Info, Obs, Policy, Step};

mod evaluator;
pub use evaluator::{DefaultEvaluator, Evaluator};
