//! Core domain: shared resources for run configuration and randomness.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Resource, Debug)]
pub struct RunConfig {
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: rand::rng().random(),
        }
    }
}

/// Random source for encounter placement. Seeded from the run so a floor
/// plays back identically for the same seed.
#[derive(Resource, Debug)]
pub struct EncounterRng(pub ChaCha8Rng);

impl EncounterRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl FromWorld for EncounterRng {
    fn from_world(world: &mut World) -> Self {
        let seed = world.get_resource::<RunConfig>().map_or(0, |config| config.seed);
        Self::from_seed(seed)
    }
}
