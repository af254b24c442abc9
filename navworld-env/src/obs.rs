//! Observations for [NavWorldEnv](crate::NavWorldEnv).
use crate::util::Array;
use anyhow::Result;
use navworld_core::{
    record::{Record, RecordValue},
    Obs,
};
use ndarray::Array3;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::marker::PhantomData;

/// Canonical dictionary-shaped observation emitted by the adapter.
///
/// The frame is emitted under the observation key configured on the
/// environment. `extras` are the entries of a dictionary-shaped native
/// observation other than the frame, passed through unmodified.
#[derive(Debug, Clone)]
pub struct NavWorldObs {
    /// RGB frame resized to the configured target size, `(height, width, 3)`.
    pub frame: Array3<u8>,

    /// True only on the observation returned by a reset.
    pub is_first: bool,

    /// True when the episode has ended, by termination or truncation.
    pub is_last: bool,

    /// True only when the episode ended by termination.
    pub is_terminal: bool,

    /// Passthrough entries of a dictionary-shaped native observation.
    pub extras: Vec<(String, Array)>,
}

impl NavWorldObs {
    /// Gets a passthrough entry by name.
    pub fn extra(&self, key: &str) -> Option<&Array> {
        self.extras
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}

impl Obs for NavWorldObs {
    fn dummy(_n: usize) -> Self {
        Self {
            frame: Array3::zeros((64, 64, 3)),
            is_first: false,
            is_last: false,
            is_terminal: false,
            extras: vec![],
        }
    }

    fn len(&self) -> usize {
        1
    }
}

/// Converts [`NavWorldObs`] to `O`.
pub trait NavWorldObsFilter<O: Obs> {
    /// Configuration of the filter.
    type Config: Clone + Default + Serialize + DeserializeOwned;

    /// Constructs the filter given a configuration.
    fn build(config: &Self::Config) -> Result<Self>
    where
        Self: Sized;

    /// Converts the canonical observation with filtering.
    fn filt(&mut self, obs: NavWorldObs) -> (O, Record);

    /// Called when resetting the environment.
    ///
    /// This method is useful for stateful filters.
    fn reset(&mut self, obs: NavWorldObs) -> O {
        let (obs, _) = self.filt(obs);
        obs
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
/// Configuration of [`NavWorldObsRawFilter`].
pub struct NavWorldObsRawFilterConfig {
    /// Passthrough entries to report in the filter's [`Record`], flattened.
    ///
    /// If `None`, no passthrough entries are recorded.
    pub record_keys: Option<Vec<String>>,
}

impl Default for NavWorldObsRawFilterConfig {
    fn default() -> Self {
        Self { record_keys: None }
    }
}

/// A filter without any processing.
pub struct NavWorldObsRawFilter<O> {
    config: NavWorldObsRawFilterConfig,
    phantom: PhantomData<O>,
}

impl<O> NavWorldObsFilter<O> for NavWorldObsRawFilter<O>
where
    O: Obs + From<NavWorldObs>,
{
    type Config = NavWorldObsRawFilterConfig;

    fn build(config: &Self::Config) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            phantom: PhantomData,
        })
    }

    /// Converts the observation without modifying it.
    ///
    /// The returned [`Record`] has the frame dimensions under `frame_shape`
    /// and, if configured, flattened passthrough entries under their keys.
    fn filt(&mut self, obs: NavWorldObs) -> (O, Record) {
        let (h, w, c) = obs.frame.dim();
        let mut record = Record::from_slice(&[(
            "frame_shape",
            RecordValue::Array1(vec![h as f32, w as f32, c as f32]),
        )]);
        if let Some(keys) = &self.config.record_keys {
            for (key, arr) in obs.extras.iter() {
                if keys.contains(key) {
                    record.insert(key.as_str(), RecordValue::Array1(arr.to_flat_vec::<f32>()));
                }
            }
        }
        (obs.into(), record)
    }
}
