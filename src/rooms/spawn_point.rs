//! Rooms domain: randomized placement of encounter participants.
//!
//! Each participant lands on one of four diagonal quadrants around the room
//! anchor, at either a near or a far distance. The far ring is favoured.

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Size of the uniform draw that picks the distance tier.
pub const TIER_OUTCOMES: u32 = 10;
/// Draws above this value land on the far ring (7 of 10 outcomes).
pub const FAR_THRESHOLD: u32 = 2;

/// Axis magnitudes of the two spawn rings, in world units.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct SpawnOffsets {
    pub near_x: f32,
    pub near_y: f32,
    pub far_x: f32,
    pub far_y: f32,
}

impl Default for SpawnOffsets {
    fn default() -> Self {
        Self {
            near_x: 48.0,
            near_y: 64.0,
            far_x: 96.0,
            far_y: 134.4,
        }
    }
}

impl SpawnOffsets {
    pub fn magnitudes(&self, tier: DistanceTier) -> Vec2 {
        match tier {
            DistanceTier::Near => Vec2::new(self.near_x, self.near_y),
            DistanceTier::Far => Vec2::new(self.far_x, self.far_y),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceTier {
    Near,
    Far,
}

pub fn roll_tier<R: Rng + ?Sized>(rng: &mut R) -> DistanceTier {
    if rng.random_range(0..TIER_OUTCOMES) > FAR_THRESHOLD {
        DistanceTier::Far
    } else {
        DistanceTier::Near
    }
}

fn roll_sign<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    if rng.random_bool(0.5) { 1.0 } else { -1.0 }
}

/// Picks a spawn position around `anchor`. Both axes always use the same
/// tier, so the offset is never a mix of near and far magnitudes.
pub fn spawn_point<R: Rng + ?Sized>(anchor: Vec2, offsets: &SpawnOffsets, rng: &mut R) -> Vec2 {
    let signs = Vec2::new(roll_sign(rng), roll_sign(rng));
    let tier = roll_tier(rng);
    anchor + signs * offsets.magnitudes(tier)
}
