//! The seam between the adapter and the wrapped simulator.
//!
//! [`World`] is the explicit surface the adapter needs from a simulator:
//! reset, step, and the two space descriptions. Anything a caller needs
//! beyond this surface is reached through
//! [`NavWorldEnv::world`](crate::NavWorldEnv::world).
use crate::{act::NavWorldAct, error::NavWorldError, util::Array};
use anyhow::Result;
use navworld_core::{record::Record, spaces::Space};
use ndarray::Array3;

mod hallway;
pub use hallway::{HallwaySensorsWorld, HallwayWorld};

/// An observation as emitted by a world, before adaptation.
///
/// The variant is fixed per world and matches its observation space:
/// [`Space::Dict`] worlds emit `Dict`, all others emit `Frame`.
#[derive(Clone, Debug)]
pub enum NativeObs {
    /// A plain RGB frame, `(height, width, 3)`.
    Frame(Array3<u8>),

    /// A dictionary of named entries.
    Dict(Vec<(String, Array)>),
}

/// The result of a single world step.
#[derive(Debug)]
pub struct NativeStep {
    /// Observation after the step.
    pub obs: NativeObs,

    /// Reward of the step.
    pub reward: f32,

    /// The episode ended by an intrinsic end condition.
    pub terminated: bool,

    /// The episode ended by an external limit.
    pub truncated: bool,

    /// Key-value payload reported by the world.
    pub info: Record,
}

/// A simulated world wrapped by [`NavWorldEnv`](crate::NavWorldEnv).
pub trait World {
    /// Resets the world, optionally reseeding it, and returns the initial
    /// observation together with a key-value payload.
    fn reset(&mut self, seed: Option<i64>) -> Result<(NativeObs, Record)>;

    /// Advances the world by one step.
    fn step(&mut self, act: &NavWorldAct) -> NativeStep;

    /// The space of native observations.
    fn observation_space(&self) -> Space;

    /// The space of native actions.
    fn action_space(&self) -> Space;
}

/// Builds a world from its identifier.
///
/// Fails with [`NavWorldError::UnknownWorld`] if the identifier is not
/// registered.
pub fn make_world(name: &str) -> Result<Box<dyn World>> {
    match name {
        "Hallway-v0" => Ok(Box::new(HallwayWorld::new())),
        "HallwaySensors-v0" => Ok(Box::new(HallwaySensorsWorld::new())),
        _ => Err(NavWorldError::UnknownWorld(name.to_string()).into()),
    }
}
