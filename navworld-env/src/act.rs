//! Actions for [NavWorldEnv](crate::NavWorldEnv).
use anyhow::Result;
use navworld_core::{
    record::{Record, RecordValue},
    Act,
};
use ndarray::Array1;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{default::Default, marker::PhantomData};

/// Action passed to a world.
#[derive(Debug, Clone)]
pub enum NavWorldAct {
    /// Index of a discrete action.
    Discrete(i64),

    /// A continuous action vector.
    Continuous(Array1<f32>),
}

impl Act for NavWorldAct {
    fn len(&self) -> usize {
        match self {
            NavWorldAct::Discrete(_) => 1,
            NavWorldAct::Continuous(a) => a.len(),
        }
    }
}

impl From<i64> for NavWorldAct {
    fn from(act: i64) -> Self {
        NavWorldAct::Discrete(act)
    }
}

impl From<Array1<f32>> for NavWorldAct {
    fn from(act: Array1<f32>) -> Self {
        NavWorldAct::Continuous(act)
    }
}

/// Converts `A` to [`NavWorldAct`].
pub trait NavWorldActFilter<A: Act> {
    /// Configuration of the filter.
    type Config: Clone + Default + Serialize + DeserializeOwned;

    /// Constructs the filter given a configuration.
    fn build(config: &Self::Config) -> Result<Self>
    where
        Self: Sized;

    /// Converts `A` into a [`NavWorldAct`].
    fn filt(&mut self, act: A) -> (NavWorldAct, Record);

    /// Resets the filter. Does nothing in the default implementation.
    fn reset(&mut self, _is_done: &Option<&Vec<i8>>) {}
}

#[derive(Debug, Deserialize, Serialize)]
/// Configuration of [`NavWorldActRawFilter`].
#[derive(Clone)]
pub struct NavWorldActRawFilterConfig;

impl Default for NavWorldActRawFilterConfig {
    fn default() -> Self {
        Self
    }
}

/// A filter without any processing.
pub struct NavWorldActRawFilter<A> {
    phantom: PhantomData<A>,
}

impl<A> NavWorldActFilter<A> for NavWorldActRawFilter<A>
where
    A: Act + Into<NavWorldAct>,
{
    type Config = NavWorldActRawFilterConfig;

    fn build(_config: &Self::Config) -> Result<Self> {
        Ok(Self {
            phantom: PhantomData,
        })
    }

    fn filt(&mut self, act: A) -> (NavWorldAct, Record) {
        let act = act.into();
        let record = match &act {
            NavWorldAct::Discrete(v) => {
                Record::from_slice(&[("act", RecordValue::Array1(vec![*v as f32]))])
            }
            NavWorldAct::Continuous(a) => {
                Record::from_slice(&[("act", RecordValue::Array1(a.to_vec()))])
            }
        };
        (act, record)
    }
}
