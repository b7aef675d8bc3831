//! ContentRegistry resource: enemy definitions keyed by id.

use bevy::prelude::*;
use std::collections::HashMap;

use super::data::EnemyDef;

#[derive(Resource, Default)]
pub struct ContentRegistry {
    pub enemies: HashMap<String, EnemyDef>,
}

impl ContentRegistry {
    /// One-line listing of the loaded enemy kinds, sorted for stable logs.
    pub fn summary(&self) -> String {
        let mut ids: Vec<&str> = self.enemies.keys().map(String::as_str).collect();
        ids.sort_unstable();
        format!("{} enemy kinds: {}", ids.len(), ids.join(", "))
    }
}
