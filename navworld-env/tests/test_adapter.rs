use anyhow::Result;
use navworld_core::{
    record::Record,
    spaces::{BoxSpace, DictSpace, DiscreteSpace, Dtype, Space},
    Env as _,
};
use navworld_env::{
    util::Array,
    world::{NativeObs, NativeStep, World},
    NavWorldAct, NavWorldActRawFilter, NavWorldEnv, NavWorldEnvConfig, NavWorldObs,
    NavWorldObsRawFilter, NavWorldObsRawFilterConfig,
};
use ndarray::{arr1, Array3};

type Obs = NavWorldObs;
type Act = NavWorldAct;
type ObsFilter = NavWorldObsRawFilter<Obs>;
type ActFilter = NavWorldActRawFilter<Act>;
type EnvConfig = NavWorldEnvConfig<Obs, Act, ObsFilter, ActFilter>;
type Env = NavWorldEnv<Obs, Act, ObsFilter, ActFilter>;

const NATIVE_H: usize = 30;
const NATIVE_W: usize = 40;

fn native_frame() -> Array3<u8> {
    Array3::from_elem((NATIVE_H, NATIVE_W, 3), 7)
}

/// A world that ends its episode at a scripted step with a scripted outcome.
struct ScriptedWorld {
    ends_at: usize,
    truncates: bool,
    steps: usize,
}

impl ScriptedWorld {
    fn new(ends_at: usize, truncates: bool) -> Self {
        Self {
            ends_at,
            truncates,
            steps: 0,
        }
    }
}

impl World for ScriptedWorld {
    fn reset(&mut self, _seed: Option<i64>) -> Result<(NativeObs, Record)> {
        self.steps = 0;
        let info = Record::from_scalar("reset_info", 1.0);
        Ok((NativeObs::Frame(native_frame()), info))
    }

    fn step(&mut self, _act: &NavWorldAct) -> NativeStep {
        self.steps += 1;
        let done = self.steps >= self.ends_at;
        NativeStep {
            obs: NativeObs::Frame(native_frame()),
            reward: 1.0,
            terminated: done && !self.truncates,
            truncated: done && self.truncates,
            info: Record::from_scalar("steps", self.steps as f32),
        }
    }

    fn observation_space(&self) -> Space {
        Space::Box(BoxSpace::new(
            0.0,
            255.0,
            &[NATIVE_H, NATIVE_W, 3],
            Dtype::U8,
        ))
    }

    fn action_space(&self) -> Space {
        Space::Discrete(DiscreteSpace::new(2))
    }
}

/// A world with a dictionary-shaped native observation and no end condition.
struct SensorWorld;

impl SensorWorld {
    fn obs() -> NativeObs {
        NativeObs::Dict(vec![
            ("image".to_string(), Array::U8(native_frame().into_dyn())),
            (
                "compass".to_string(),
                Array::F32(arr1(&[0.5f32, -0.5]).into_dyn()),
            ),
        ])
    }
}

impl World for SensorWorld {
    fn reset(&mut self, _seed: Option<i64>) -> Result<(NativeObs, Record)> {
        Ok((Self::obs(), Record::empty()))
    }

    fn step(&mut self, _act: &NavWorldAct) -> NativeStep {
        NativeStep {
            obs: Self::obs(),
            reward: 0.0,
            terminated: false,
            truncated: false,
            info: Record::empty(),
        }
    }

    fn observation_space(&self) -> Space {
        Space::Dict(DictSpace::from_pairs(vec![
            (
                "image",
                Space::Box(BoxSpace::new(0.0, 255.0, &[NATIVE_H, NATIVE_W, 3], Dtype::U8)),
            ),
            (
                "compass",
                Space::Box(BoxSpace::new(-1.0, 1.0, &[2], Dtype::F32)),
            ),
        ]))
    }

    fn action_space(&self) -> Space {
        Space::Discrete(DiscreteSpace::new(2))
    }
}

fn scripted_env(ends_at: usize, truncates: bool, config: EnvConfig) -> Env {
    Env::from_world(Box::new(ScriptedWorld::new(ends_at, truncates)), &config, 0).unwrap()
}

#[test]
fn synthesized_observation_space_has_frame_and_flags() {
    let env = scripted_env(10, false, EnvConfig::default());
    let space = env.observation_space();
    let dict = match space {
        Space::Dict(d) => d,
        _ => panic!("expected a dict space"),
    };
    let keys: Vec<&str> = dict.keys().map(|k| k.as_str()).collect();
    assert_eq!(keys, vec!["image", "is_first", "is_last", "is_terminal"]);
    match dict.get("image").unwrap() {
        Space::Box(b) => {
            assert_eq!(b.shape, vec![64, 64, 3]);
            assert_eq!(b.dtype, Dtype::U8);
        }
        _ => panic!("expected a box space for the frame"),
    }
    for key in &["is_first", "is_last", "is_terminal"] {
        assert_eq!(
            dict.get(key).unwrap(),
            &Space::Box(BoxSpace::scalar_bool())
        );
    }
}

#[test]
fn observation_space_follows_configured_key_and_size() {
    let config = EnvConfig::default().obs_key("pixels").size(32, 24);
    let env = scripted_env(10, false, config);
    let dict = match env.observation_space() {
        Space::Dict(d) => d,
        _ => panic!("expected a dict space"),
    };
    assert!(dict.get("image").is_none());
    match dict.get("pixels").unwrap() {
        Space::Box(b) => assert_eq!(b.shape, vec![24, 32, 3]),
        _ => panic!("expected a box space for the frame"),
    }
}

#[test]
fn action_space_is_delegated_with_discreteness_marker() {
    let env = scripted_env(10, false, EnvConfig::default());
    let space = env.action_space();
    assert!(space.discrete);
    assert_eq!(space.space, Space::Discrete(DiscreteSpace::new(2)));
    // The same space is reachable through the inner world.
    assert_eq!(env.world().action_space(), space.space);
}

#[test]
fn reset_sets_only_is_first() {
    let mut env = scripted_env(10, false, EnvConfig::default());
    let obs = env.reset(None).unwrap();
    assert!(obs.is_first);
    assert!(!obs.is_last);
    assert!(!obs.is_terminal);
}

#[test]
fn termination_sets_is_last_and_is_terminal() {
    let mut env = scripted_env(3, false, EnvConfig::default());
    env.reset(None).unwrap();
    for _ in 0..2 {
        let (step, _) = env.step(&0.into());
        assert!(!step.obs.is_last);
        assert!(!step.is_done());
    }
    let (step, _) = env.step(&0.into());
    assert!(!step.obs.is_first);
    assert!(step.obs.is_last);
    assert!(step.obs.is_terminal);
    assert_eq!(step.is_terminated[0], 1);
    assert_eq!(step.is_truncated[0], 0);
    assert!(step.is_done());
}

#[test]
fn truncation_sets_is_last_but_not_is_terminal() {
    let mut env = scripted_env(2, true, EnvConfig::default());
    env.reset(None).unwrap();
    env.step(&0.into());
    let (step, _) = env.step(&0.into());
    assert!(step.obs.is_last);
    assert!(!step.obs.is_terminal);
    assert_eq!(step.is_terminated[0], 0);
    assert_eq!(step.is_truncated[0], 1);
    assert!(step.is_done());
}

#[test]
fn frames_are_resized_to_the_configured_size() {
    let mut env = scripted_env(10, false, EnvConfig::default());
    let obs = env.reset(None).unwrap();
    assert_eq!(obs.frame.dim(), (64, 64, 3));
    let (step, _) = env.step(&0.into());
    assert_eq!(step.obs.frame.dim(), (64, 64, 3));

    let mut env = scripted_env(10, false, EnvConfig::default().size(32, 24));
    let obs = env.reset(None).unwrap();
    assert_eq!(obs.frame.dim(), (24, 32, 3));
}

#[test]
fn dict_world_extras_pass_through_unmodified() {
    let config = EnvConfig::default();
    let mut env = Env::from_world(Box::new(SensorWorld), &config, 0).unwrap();
    let obs = env.reset(None).unwrap();
    assert_eq!(obs.frame.dim(), (64, 64, 3));
    assert_eq!(obs.extras.len(), 1);
    let compass = obs.extra("compass").unwrap();
    assert_eq!(compass.shape(), &[2]);
    assert_eq!(compass.to_flat_vec::<f32>(), vec![0.5, -0.5]);
}

#[test]
fn dict_world_observation_space_is_copied_verbatim() {
    let config = EnvConfig::default();
    let env = Env::from_world(Box::new(SensorWorld), &config, 0).unwrap();
    let space = env.observation_space();
    // The world's own dict space, without injected flag entries.
    assert_eq!(space, SensorWorld.observation_space());
    match space {
        Space::Dict(d) => assert!(d.get("is_first").is_none()),
        _ => panic!("expected a dict space"),
    }
}

#[test]
fn configured_record_keys_are_reported() {
    let obs_filter_config = NavWorldObsRawFilterConfig {
        record_keys: Some(vec!["compass".to_string()]),
    };
    let config = EnvConfig::default().obs_filter_config(obs_filter_config);
    let mut env = Env::from_world(Box::new(SensorWorld), &config, 0).unwrap();
    env.reset(None).unwrap();
    let (_, record) = env.step(&0.into());
    assert_eq!(record.get_array1("compass").unwrap(), vec![0.5, -0.5]);
    assert_eq!(
        record.get_array1("frame_shape").unwrap(),
        vec![64.0, 64.0, 3.0]
    );
}

#[test]
fn step_limit_truncates_the_episode() {
    let config = EnvConfig::default().max_steps(Some(5));
    let mut env = scripted_env(100, false, config);
    env.reset(None).unwrap();
    for _ in 0..4 {
        let (step, _) = env.step(&0.into());
        assert!(!step.is_done());
    }
    let (step, _) = env.step(&0.into());
    assert!(step.obs.is_last);
    assert!(!step.obs.is_terminal);
    assert_eq!(step.is_truncated[0], 1);
}

#[test]
fn step_info_carries_the_world_payload() {
    let mut env = scripted_env(10, false, EnvConfig::default());
    env.reset(None).unwrap();
    let (step, _) = env.step(&0.into());
    assert_eq!(step.info.0.get_scalar("steps").unwrap(), 1.0);
}

#[test]
fn step_with_reset_returns_a_fresh_initial_observation() {
    let mut env = scripted_env(1, false, EnvConfig::default());
    env.reset(None).unwrap();
    let (step, _) = env.step_with_reset(&0.into());
    assert!(step.is_done());
    assert!(step.obs.is_last);
    assert!(step.init_obs.is_first);
}

#[test]
fn unknown_world_fails_construction() {
    let config = EnvConfig::default().name("Atlantis-v0");
    let err = Env::build(&config, 0).err().unwrap();
    assert!(err.to_string().contains("Unknown world"));
}
