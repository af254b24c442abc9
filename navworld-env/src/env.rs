//! Wrapper of navigable world simulators.
use crate::{
    act::{NavWorldAct, NavWorldActFilter},
    obs::{NavWorldObs, NavWorldObsFilter},
    util::{resize_frame, Array},
    world::{make_world, NativeObs, World},
};
use anyhow::Result;
use log::{info, trace};
use navworld_core::{
    record::Record,
    spaces::{ActionSpace, BoxSpace, DictSpace, Dtype, Space},
    Act, Env, Info, Obs, Step,
};
use ndarray::{Array3, Ix3};
use std::marker::PhantomData;

mod config;
pub use config::NavWorldEnvConfig;

/// Information given at every step of the interaction with the environment.
///
/// Carries the key-value payload reported by the world. The payload of a
/// reset is discarded; only steps forward theirs.
pub struct NavWorldInfo(pub Record);

impl Info for NavWorldInfo {}

/// An environment adapting a [`World`] to the [`Env`] interface.
///
/// The adapter normalizes native observations into the canonical
/// dictionary shape of [`NavWorldObs`]: a plain frame is wrapped under the
/// configured observation key, the frame is resized to the configured target
/// size with nearest-neighbor interpolation, and the `is_first` / `is_last` /
/// `is_terminal` episode flags are injected. Whether the world emits
/// dictionary-shaped observations is detected once, at construction.
pub struct NavWorldEnv<O, A, OF, AF>
where
    O: Obs,
    A: Act,
    OF: NavWorldObsFilter<O>,
    AF: NavWorldActFilter<A>,
{
    world: Box<dyn World>,

    // Fixed at construction from the world's observation space.
    obs_is_dict: bool,

    obs_key: String,

    #[allow(dead_code)]
    act_key: String,

    // Target frame size as (width, height).
    size: (u32, u32),

    count_steps: usize,

    max_steps: Option<usize>,

    obs_filter: OF,

    act_filter: AF,

    /// Initial seed.
    ///
    /// This value will be used at the first call of the reset method.
    initial_seed: Option<i64>,

    phantom: PhantomData<(O, A)>,
}

impl<O, A, OF, AF> NavWorldEnv<O, A, OF, AF>
where
    O: Obs + From<NavWorldObs>,
    A: Act + Into<NavWorldAct>,
    OF: NavWorldObsFilter<O>,
    AF: NavWorldActFilter<A>,
{
    /// Wraps an already-built world with this adapter.
    ///
    /// Used for worlds that are not registered with
    /// [`make_world`](crate::world::make_world); [`Env::build`] covers the
    /// registered ones.
    pub fn from_world(
        world: Box<dyn World>,
        config: &NavWorldEnvConfig<O, A, OF, AF>,
        seed: i64,
    ) -> Result<Self> {
        let obs_is_dict = world.observation_space().is_dict();
        Ok(Self {
            world,
            obs_is_dict,
            obs_key: config.obs_key.clone(),
            act_key: config.act_key.clone(),
            size: config.size,
            count_steps: 0,
            max_steps: config.max_steps,
            obs_filter: OF::build(&config.obs_filter_config)?,
            act_filter: AF::build(&config.act_filter_config)?,
            initial_seed: Some(seed),
            phantom: PhantomData,
        })
    }

    /// The wrapped world.
    ///
    /// Anything beyond the standardized surface of the adapter is reached
    /// through this accessor.
    pub fn world(&self) -> &dyn World {
        self.world.as_ref()
    }

    /// The wrapped world, mutable.
    pub fn world_mut(&mut self) -> &mut dyn World {
        self.world.as_mut()
    }

    /// The space of observations emitted by the adapter.
    ///
    /// For a world with a dictionary-shaped native space, this is a copy of
    /// the world's own space. Otherwise it is a dictionary space with the
    /// frame entry under the configured observation key plus the three
    /// episode flag entries.
    pub fn observation_space(&self) -> Space {
        if self.obs_is_dict {
            self.world.observation_space()
        } else {
            let (w, h) = self.size;
            let mut spaces = DictSpace::new();
            spaces.insert(
                self.obs_key.as_str(),
                Space::Box(BoxSpace::new(
                    0.0,
                    255.0,
                    &[h as usize, w as usize, 3],
                    Dtype::U8,
                )),
            );
            spaces.insert("is_first", Space::Box(BoxSpace::scalar_bool()));
            spaces.insert("is_last", Space::Box(BoxSpace::scalar_bool()));
            spaces.insert("is_terminal", Space::Box(BoxSpace::scalar_bool()));
            Space::Dict(spaces)
        }
    }

    /// The space of actions accepted by the adapter.
    ///
    /// Delegated from the world, with the discreteness marker attached.
    pub fn action_space(&self) -> ActionSpace {
        self.world.action_space().into()
    }

    /// Normalizes a native observation into the canonical shape.
    ///
    /// A plain frame is wrapped under the configured observation key; for a
    /// dictionary observation, the frame is taken from that key and the other
    /// entries pass through unmodified. The frame is resized in either case.
    fn convert_obs(&self, native: NativeObs) -> NavWorldObs {
        let (frame, extras) = match native {
            NativeObs::Frame(frame) => (frame, Vec::new()),
            NativeObs::Dict(entries) => {
                let mut frame: Option<Array3<u8>> = None;
                let mut extras = Vec::new();
                for (key, value) in entries {
                    if key == self.obs_key {
                        frame = match value {
                            Array::U8(a) => Some(a.into_dimensionality::<Ix3>().unwrap()),
                            _ => panic!(
                                "'{}' entry of the native observation is not a u8 frame",
                                self.obs_key
                            ),
                        };
                    } else {
                        extras.push((key, value));
                    }
                }
                match frame {
                    Some(frame) => (frame, extras),
                    None => panic!("native observation has no '{}' entry", self.obs_key),
                }
            }
        };
        let (w, h) = self.size;
        NavWorldObs {
            frame: resize_frame(&frame, w, h),
            is_first: false,
            is_last: false,
            is_terminal: false,
            extras,
        }
    }
}

impl<O, A, OF, AF> Env for NavWorldEnv<O, A, OF, AF>
where
    O: Obs + From<NavWorldObs>,
    A: Act + Into<NavWorldAct>,
    OF: NavWorldObsFilter<O>,
    AF: NavWorldActFilter<A>,
{
    type Obs = O;
    type Act = A;
    type Info = NavWorldInfo;
    type Config = NavWorldEnvConfig<O, A, OF, AF>;

    /// Constructs the adapter around the world named in the configuration.
    ///
    /// * `seed` - The seed value of the world's random number generator.
    ///   This value will be used at the first call of the reset method.
    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        let world = make_world(&config.name)?;
        info!("Built world {}", config.name);
        Self::from_world(world, config, seed)
    }

    /// Resets the environment and returns an observation.
    ///
    /// The returned observation has `is_first` set; the world's reset info
    /// payload is discarded. The length of `is_done` is assumed to be 1.
    fn reset(&mut self, is_done: Option<&Vec<i8>>) -> Result<O> {
        trace!("NavWorldEnv::reset()");

        // Reset the action filter, required for stateful filters.
        self.act_filter.reset(&is_done);

        let reset = match is_done {
            None => true,
            Some(v) => {
                debug_assert_eq!(v.len(), 1);
                v[0] != 0
            }
        };

        if !reset {
            return Ok(O::dummy(1));
        }

        let seed = self.initial_seed.take();
        let (native, _) = self.world.reset(seed)?;
        self.count_steps = 0;
        let mut obs = self.convert_obs(native);
        obs.is_first = true;
        obs.is_last = false;
        obs.is_terminal = false;
        Ok(self.obs_filter.reset(obs))
    }

    /// Resets the environment with the given index.
    ///
    /// The index is used as the seed of the next reset.
    fn reset_with_index(&mut self, ix: usize) -> Result<Self::Obs> {
        self.initial_seed = Some(ix as _);
        self.reset(None)
    }

    /// Runs a step of the environment's dynamics.
    ///
    /// The returned [`Record`] is composed of the records constructed by the
    /// observation and action filters.
    fn step(&mut self, a: &A) -> (Step<Self>, Record) {
        trace!("NavWorldEnv::step()");

        let (act, record_a) = self.act_filter.filt(a.clone());
        let native = self.world.step(&act);
        let is_terminated = native.terminated;
        let mut is_truncated = native.truncated;

        self.count_steps += 1;
        if let Some(max_steps) = self.max_steps {
            if self.count_steps >= max_steps {
                is_truncated = true;
            }
        }
        let done = is_terminated || is_truncated;

        let mut obs = self.convert_obs(native.obs);
        obs.is_first = false;
        obs.is_last = done;
        obs.is_terminal = is_terminated;
        let (obs, record_o) = self.obs_filter.filt(obs);

        let step = Step::new(
            obs,
            a.clone(),
            vec![native.reward],
            vec![is_terminated as i8],
            vec![is_truncated as i8],
            NavWorldInfo(native.info),
            O::dummy(1),
        );
        (step, record_o.merge(record_a))
    }

    /// Performs a step and resets the environment inside the returned
    /// [`Step`] if the episode ended.
    fn step_with_reset(&mut self, a: &Self::Act) -> (Step<Self>, Record)
    where
        Self: Sized,
    {
        let (step, record) = self.step(a);
        debug_assert_eq!(step.is_terminated.len(), 1);
        let step = if step.is_done() {
            let init_obs = self.reset(None).unwrap();
            Step {
                act: step.act,
                obs: step.obs,
                reward: step.reward,
                is_terminated: step.is_terminated,
                is_truncated: step.is_truncated,
                info: step.info,
                init_obs,
            }
        } else {
            step
        };

        (step, record)
    }
}
