//! Observation and action space descriptions.
//!
//! Spaces describe the shape and bounds of the values an environment emits and
//! accepts. Environments report a [`Space`] for their observations and an
//! [`ActionSpace`] for their actions; the latter carries a discreteness
//! marker for the consumer of the environment.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Element type of a [`BoxSpace`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dtype {
    /// Unsigned 8-bit integers, used for image frames.
    U8,

    /// Booleans, represented as values in `{0, 1}`.
    Bool,

    /// 32-bit floating-point values.
    F32,
}

/// A space of bounded arrays with a fixed shape.
///
/// An empty shape denotes a scalar entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoxSpace {
    /// Lower bound of each element.
    pub low: f32,

    /// Upper bound of each element.
    pub high: f32,

    /// Shape of the space.
    pub shape: Vec<usize>,

    /// Element type.
    pub dtype: Dtype,
}

impl BoxSpace {
    /// Constructs a box space with uniform bounds.
    pub fn new(low: f32, high: f32, shape: &[usize], dtype: Dtype) -> Self {
        Self {
            low,
            high,
            shape: shape.to_vec(),
            dtype,
        }
    }

    /// A scalar boolean entry, bounded by `[0, 1]`.
    pub fn scalar_bool() -> Self {
        Self::new(0.0, 1.0, &[], Dtype::Bool)
    }

    /// The total number of elements in a sample of this space.
    pub fn num_elements(&self) -> usize {
        self.shape.iter().product()
    }
}

/// A space of `n` discrete choices, `0..n`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiscreteSpace {
    /// The number of choices.
    pub n: i64,
}

impl DiscreteSpace {
    /// Constructs a discrete space with `n` choices.
    pub fn new(n: i64) -> Self {
        Self { n }
    }

    /// Checks whether a value lies in this space.
    pub fn contains(&self, v: i64) -> bool {
        (0..self.n).contains(&v)
    }
}

/// A dictionary of named sub-spaces.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DictSpace {
    /// Named sub-spaces.
    pub spaces: BTreeMap<String, Space>,
}

impl DictSpace {
    /// Constructs an empty dictionary space.
    pub fn new() -> Self {
        Self {
            spaces: BTreeMap::new(),
        }
    }

    /// Constructs a dictionary space from a list of `(name, space)` pairs.
    pub fn from_pairs(pairs: Vec<(&str, Space)>) -> Self {
        Self {
            spaces: pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        }
    }

    /// Inserts a named sub-space.
    pub fn insert(&mut self, name: impl Into<String>, space: Space) {
        self.spaces.insert(name.into(), space);
    }

    /// Gets a sub-space by name.
    pub fn get(&self, name: &str) -> Option<&Space> {
        self.spaces.get(name)
    }

    /// Returns an iterator over the sub-space names.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.spaces.keys()
    }

    /// The number of sub-spaces.
    pub fn len(&self) -> usize {
        self.spaces.len()
    }

    /// Whether the dictionary has no sub-spaces.
    pub fn is_empty(&self) -> bool {
        self.spaces.is_empty()
    }
}

impl Default for DictSpace {
    fn default() -> Self {
        Self::new()
    }
}

/// A space of any supported kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Space {
    /// Bounded arrays of a fixed shape.
    Box(BoxSpace),

    /// A finite set of choices.
    Discrete(DiscreteSpace),

    /// A dictionary of named sub-spaces.
    Dict(DictSpace),
}

impl Space {
    /// Whether the space is dictionary-structured.
    pub fn is_dict(&self) -> bool {
        matches!(self, Space::Dict(_))
    }

    /// The shape of samples of the space, if it has one.
    ///
    /// Dictionary spaces have no single shape and return `None`.
    pub fn shape(&self) -> Option<&[usize]> {
        match self {
            Space::Box(s) => Some(&s.shape),
            Space::Discrete(_) => Some(&[]),
            Space::Dict(_) => None,
        }
    }
}

/// An action space together with a discreteness marker.
///
/// The marker tells the consumer of the environment whether actions are
/// discrete choices or continuous vectors, without inspecting the space.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionSpace {
    /// The underlying space, delegated from the inner environment.
    pub space: Space,

    /// `true` if the space is a [`DiscreteSpace`].
    pub discrete: bool,
}

impl From<Space> for ActionSpace {
    fn from(space: Space) -> Self {
        let discrete = matches!(space, Space::Discrete(_));
        Self { space, discrete }
    }
}
