//! Configuration of [NavWorldEnv](super::NavWorldEnv).
use crate::{act::NavWorldActFilter, obs::NavWorldObsFilter};
use anyhow::Result;
use navworld_core::{Act, Obs};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

#[derive(Serialize, Deserialize, Debug)]
/// Configuration of [`NavWorldEnv`](super::NavWorldEnv).
pub struct NavWorldEnvConfig<O, A, OF, AF>
where
    O: Obs,
    A: Act,
    OF: NavWorldObsFilter<O>,
    AF: NavWorldActFilter<A>,
{
    pub(super) name: String,
    pub(super) obs_key: String,
    pub(super) act_key: String,
    pub(super) size: (u32, u32),
    pub(super) max_steps: Option<usize>,
    pub(super) obs_filter_config: OF::Config,
    pub(super) act_filter_config: AF::Config,
}

impl<O, A, OF, AF> Clone for NavWorldEnvConfig<O, A, OF, AF>
where
    O: Obs,
    A: Act,
    OF: NavWorldObsFilter<O>,
    AF: NavWorldActFilter<A>,
{
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            obs_key: self.obs_key.clone(),
            act_key: self.act_key.clone(),
            size: self.size,
            max_steps: self.max_steps,
            obs_filter_config: self.obs_filter_config.clone(),
            act_filter_config: self.act_filter_config.clone(),
        }
    }
}

impl<O, A, OF, AF> Default for NavWorldEnvConfig<O, A, OF, AF>
where
    O: Obs,
    A: Act,
    OF: NavWorldObsFilter<O>,
    AF: NavWorldActFilter<A>,
{
    fn default() -> Self {
        Self {
            name: "".to_string(),
            obs_key: "image".to_string(),
            act_key: "action".to_string(),
            size: (64, 64),
            max_steps: None,
            obs_filter_config: Default::default(),
            act_filter_config: Default::default(),
        }
    }
}

impl<O, A, OF, AF> NavWorldEnvConfig<O, A, OF, AF>
where
    O: Obs,
    A: Act,
    OF: NavWorldObsFilter<O>,
    AF: NavWorldActFilter<A>,
{
    /// Sets the identifier of the world.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the observation key under which the frame is emitted.
    pub fn obs_key(mut self, key: impl Into<String>) -> Self {
        self.obs_key = key.into();
        self
    }

    /// Sets the action key expected by the consumer of the environment.
    pub fn act_key(mut self, key: impl Into<String>) -> Self {
        self.act_key = key.into();
        self
    }

    /// Sets the target frame size as `(width, height)`.
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// Sets the maximum number of steps in an episode.
    ///
    /// Hitting the limit truncates the episode.
    pub fn max_steps(mut self, v: Option<usize>) -> Self {
        self.max_steps = v;
        self
    }

    /// Sets the observation filter config.
    pub fn obs_filter_config(mut self, config: OF::Config) -> Self {
        self.obs_filter_config = config;
        self
    }

    /// Sets the action filter config.
    pub fn act_filter_config(mut self, config: AF::Config) -> Self {
        self.act_filter_config = config;
        self
    }

    /// Loads the configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        Ok(serde_yaml::from_reader(rdr)?)
    }

    /// Saves the configuration to a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let wtr = BufWriter::new(File::create(path)?);
        Ok(serde_yaml::to_writer(wtr, self)?)
    }
}
