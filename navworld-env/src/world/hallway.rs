//! Built-in corridor worlds.
use super::{NativeObs, NativeStep, World};
use crate::{act::NavWorldAct, util::Array};
use anyhow::Result;
use navworld_core::{
    record::{Record, RecordValue},
    spaces::{BoxSpace, DictSpace, DiscreteSpace, Dtype, Space},
};
use ndarray::{arr1, Array3};

const FRAME_HEIGHT: usize = 60;
const FRAME_WIDTH: usize = 80;
const HALLWAY_LENGTH: i64 = 12;
const MAX_EPISODE_STEPS: usize = 180;

// Headings, counted clockwise from the goal direction.
const EAST: u8 = 0;
const SOUTH: u8 = 1;
const WEST: u8 = 2;
const NORTH: u8 = 3;

/// A narrow corridor with a goal tile at its far end.
///
/// Actions are turn left (0), turn right (1) and move forward (2). Reaching
/// the goal terminates the episode with a reward shaped by the number of
/// steps taken; episodes exceeding the intrinsic step limit are truncated.
/// The spawn heading is drawn from the seeded generator on every reset.
pub struct HallwayWorld {
    pos: i64,
    heading: u8,
    steps: usize,
    rng: fastrand::Rng,
}

impl HallwayWorld {
    /// Constructs the world.
    pub fn new() -> Self {
        Self {
            pos: 0,
            heading: EAST,
            steps: 0,
            rng: fastrand::Rng::with_seed(0),
        }
    }

    /// Current cell of the agent within the corridor.
    pub fn position(&self) -> i64 {
        self.pos
    }

    /// Distance to the goal tile, in cells.
    pub fn distance_to_goal(&self) -> i64 {
        HALLWAY_LENGTH - 1 - self.pos
    }

    // Unit vector toward the goal in the agent's egocentric frame.
    fn compass(&self) -> [f32; 2] {
        match self.heading {
            EAST => [1.0, 0.0],
            SOUTH => [0.0, 1.0],
            WEST => [-1.0, 0.0],
            _ => [0.0, -1.0],
        }
    }

    /// Renders the first-person view of the corridor.
    ///
    /// The facing wall band grows as the agent approaches it; the goal wall
    /// to the east is painted red, all other walls gray.
    fn render(&self) -> Array3<u8> {
        let mut frame = Array3::<u8>::zeros((FRAME_HEIGHT, FRAME_WIDTH, 3));
        let horizon = FRAME_HEIGHT / 2;
        let dist = match self.heading {
            EAST => self.distance_to_goal(),
            WEST => self.pos,
            _ => 0,
        };
        let band = (FRAME_HEIGHT as i64 / (2 * (dist + 1))) as usize;
        for y in 0..FRAME_HEIGHT {
            for x in 0..FRAME_WIDTH {
                let (r, g, b) = if y < horizon.saturating_sub(band) {
                    (46, 46, 66)
                } else if y >= horizon + band {
                    let shade = (y - horizon) as u8;
                    (90u8.saturating_add(shade), 76u8.saturating_add(shade), 58)
                } else {
                    match self.heading {
                        EAST => (190, 40, 40),
                        WEST => (120, 120, 130),
                        _ => (104, 104, 112),
                    }
                };
                frame[[y, x, 0]] = r;
                frame[[y, x, 1]] = g;
                frame[[y, x, 2]] = b;
            }
        }
        frame
    }
}

impl Default for HallwayWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl World for HallwayWorld {
    fn reset(&mut self, seed: Option<i64>) -> Result<(NativeObs, Record)> {
        if let Some(seed) = seed {
            self.rng = fastrand::Rng::with_seed(seed as u64);
        }
        self.pos = 0;
        self.heading = self.rng.u8(0..4);
        self.steps = 0;
        let info = Record::from_scalar("heading", self.heading as f32);
        Ok((NativeObs::Frame(self.render()), info))
    }

    fn step(&mut self, act: &NavWorldAct) -> NativeStep {
        let choice = match act {
            NavWorldAct::Discrete(v) => *v,
            NavWorldAct::Continuous(_) => panic!("HallwayWorld takes discrete actions"),
        };
        self.steps += 1;
        match choice {
            0 => self.heading = (self.heading + 3) % 4,
            1 => self.heading = (self.heading + 1) % 4,
            2 => {
                if self.heading == EAST && self.pos < HALLWAY_LENGTH - 1 {
                    self.pos += 1;
                } else if self.heading == WEST && self.pos > 0 {
                    self.pos -= 1;
                }
            }
            _ => panic!("action {} is out of range", choice),
        }
        let terminated = self.pos == HALLWAY_LENGTH - 1;
        let truncated = !terminated && self.steps >= MAX_EPISODE_STEPS;
        let reward = if terminated {
            1.0 - 0.5 * self.steps as f32 / MAX_EPISODE_STEPS as f32
        } else {
            0.0
        };
        let info = Record::from_slice(&[
            ("pos", RecordValue::Scalar(self.pos as f32)),
            ("steps", RecordValue::Scalar(self.steps as f32)),
        ]);
        NativeStep {
            obs: NativeObs::Frame(self.render()),
            reward,
            terminated,
            truncated,
            info,
        }
    }

    fn observation_space(&self) -> Space {
        Space::Box(BoxSpace::new(
            0.0,
            255.0,
            &[FRAME_HEIGHT, FRAME_WIDTH, 3],
            Dtype::U8,
        ))
    }

    fn action_space(&self) -> Space {
        Space::Discrete(DiscreteSpace::new(3))
    }
}

/// The corridor world with a dictionary-shaped native observation.
///
/// Emits the frame under `"image"` together with a `"compass"` entry, a
/// unit vector pointing toward the goal in the agent's egocentric frame.
pub struct HallwaySensorsWorld {
    inner: HallwayWorld,
}

impl HallwaySensorsWorld {
    /// Constructs the world.
    pub fn new() -> Self {
        Self {
            inner: HallwayWorld::new(),
        }
    }

    fn dict_obs(&self) -> NativeObs {
        NativeObs::Dict(vec![
            ("image".to_string(), Array::U8(self.inner.render().into_dyn())),
            (
                "compass".to_string(),
                Array::F32(arr1(&self.inner.compass()).into_dyn()),
            ),
        ])
    }
}

impl Default for HallwaySensorsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl World for HallwaySensorsWorld {
    fn reset(&mut self, seed: Option<i64>) -> Result<(NativeObs, Record)> {
        let (_, info) = self.inner.reset(seed)?;
        Ok((self.dict_obs(), info))
    }

    fn step(&mut self, act: &NavWorldAct) -> NativeStep {
        let step = self.inner.step(act);
        NativeStep {
            obs: self.dict_obs(),
            reward: step.reward,
            terminated: step.terminated,
            truncated: step.truncated,
            info: step.info,
        }
    }

    fn observation_space(&self) -> Space {
        Space::Dict(DictSpace::from_pairs(vec![
            ("image", self.inner.observation_space()),
            (
                "compass",
                Space::Box(BoxSpace::new(-1.0, 1.0, &[2], Dtype::F32)),
            ),
        ]))
    }

    fn action_space(&self) -> Space {
        self.inner.action_space()
    }
}
