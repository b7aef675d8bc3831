//! Enemies domain: process-wide pool of reusable enemy instances.

use std::collections::HashMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::content::EnemyDef;

/// Request for one encounter participant: which archetype, and how it moves.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EnemyTemplate {
    pub kind: String,
    #[serde(default = "default_speed")]
    pub speed: f32,
}

fn default_speed() -> f32 {
    64.0
}

impl EnemyTemplate {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            speed: default_speed(),
        }
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }
}

/// Visual and combat parameters shared by every instance of a kind.
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyArchetype {
    pub kind: String,
    pub color: Color,
    pub size: f32,
    pub max_health: u32,
    pub contact_damage: u32,
}

impl From<&EnemyDef> for EnemyArchetype {
    fn from(def: &EnemyDef) -> Self {
        Self {
            kind: def.id.clone(),
            color: Color::srgb(def.color.0, def.color.1, def.color.2),
            size: def.size,
            max_health: def.max_health,
            contact_damage: def.contact_damage,
        }
    }
}

/// Stable index of an instance inside the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnemyHandle(usize);

impl EnemyHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct EnemyInstance {
    pub template: EnemyTemplate,
    active: bool,
    /// Position to teleport to on the next entity sync
    pending_placement: Option<Vec2>,
    /// Times this instance has been handed out
    uses: u32,
    entity: Option<Entity>,
}

impl EnemyInstance {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn uses(&self) -> u32 {
        self.uses
    }

    pub fn entity(&self) -> Option<Entity> {
        self.entity
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    UnregisteredKind(String),
}

impl std::fmt::Display for PoolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PoolError::UnregisteredKind(kind) => {
                write!(f, "enemy kind '{}' is not registered with the pool", kind)
            }
        }
    }
}

impl std::error::Error for PoolError {}

/// Owns every enemy instance for the whole floor. Only one room's encounter
/// runs at a time, so a single pool serves all rooms.
#[derive(Resource, Debug, Default)]
pub struct EnemyPool {
    archetypes: HashMap<String, EnemyArchetype>,
    instances: Vec<EnemyInstance>,
}

impl EnemyPool {
    pub fn register(&mut self, archetype: EnemyArchetype) {
        self.archetypes.insert(archetype.kind.clone(), archetype);
    }

    pub fn is_registered(&self, kind: &str) -> bool {
        self.archetypes.contains_key(kind)
    }

    pub fn archetype(&self, kind: &str) -> Option<&EnemyArchetype> {
        self.archetypes.get(kind)
    }

    /// Fails on the first template whose kind is unknown.
    pub fn check_templates(&self, templates: &[EnemyTemplate]) -> Result<(), PoolError> {
        match templates.iter().find(|t| !self.is_registered(&t.kind)) {
            Some(template) => Err(PoolError::UnregisteredKind(template.kind.clone())),
            None => Ok(()),
        }
    }

    /// Hands out an instance for `template`, reusing an inactive instance of
    /// the same kind before allocating. The returned instance is already
    /// marked active so a second request cannot receive it.
    pub fn get_enemy(&mut self, template: &EnemyTemplate) -> Result<EnemyHandle, PoolError> {
        if !self.is_registered(&template.kind) {
            return Err(PoolError::UnregisteredKind(template.kind.clone()));
        }

        let reusable = self
            .instances
            .iter()
            .position(|i| !i.active && i.template.kind == template.kind);

        let index = match reusable {
            Some(index) => {
                self.instances[index].template = template.clone();
                index
            }
            None => {
                self.instances.push(EnemyInstance {
                    template: template.clone(),
                    active: false,
                    pending_placement: None,
                    uses: 0,
                    entity: None,
                });
                debug!(
                    "[POOL] Allocated '{}' instance (pool size {})",
                    template.kind,
                    self.instances.len()
                );
                self.instances.len() - 1
            }
        };

        let instance = &mut self.instances[index];
        instance.active = true;
        instance.uses += 1;
        Ok(EnemyHandle(index))
    }

    /// Places an instance in the world.
    pub fn spawn(&mut self, handle: EnemyHandle, position: Vec2) {
        if let Some(instance) = self.instances.get_mut(handle.0) {
            instance.active = true;
            instance.pending_placement = Some(position);
        }
    }

    /// Marks an instance inactive. Returns false if it already was.
    pub fn deactivate(&mut self, handle: EnemyHandle) -> bool {
        match self.instances.get_mut(handle.0) {
            Some(instance) if instance.active => {
                instance.active = false;
                instance.pending_placement = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_active(&self, handle: EnemyHandle) -> bool {
        self.instances
            .get(handle.0)
            .is_some_and(|instance| instance.active)
    }

    pub fn instance(&self, handle: EnemyHandle) -> Option<&EnemyInstance> {
        self.instances.get(handle.0)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn active_count(&self) -> usize {
        self.instances.iter().filter(|i| i.active).count()
    }

    pub fn handles(&self) -> impl Iterator<Item = EnemyHandle> + '_ {
        (0..self.instances.len()).map(EnemyHandle)
    }

    pub fn bind_entity(&mut self, handle: EnemyHandle, entity: Entity) {
        if let Some(instance) = self.instances.get_mut(handle.0) {
            instance.entity = Some(entity);
        }
    }

    pub fn take_placement(&mut self, handle: EnemyHandle) -> Option<Vec2> {
        self.instances
            .get_mut(handle.0)
            .and_then(|instance| instance.pending_placement.take())
    }
}
