//! Core domain: game state definitions for the run flow.

use bevy::prelude::*;

#[derive(States, Debug, Hash, Eq, PartialEq, Clone, Default)]
pub enum GameState {
    /// Content is loading and validating
    #[default]
    Boot,
    /// Player is exploring a floor
    Floor,
    /// Player health ran out
    Defeated,
}
