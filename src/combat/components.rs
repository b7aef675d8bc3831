//! Combat domain: health and the typed damage capability.

use bevy::prelude::*;

/// Result of offering damage to a receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Invincible, already depleted, or zero damage
    Ignored,
    Hurt { remaining: u32 },
    /// This hit emptied the receiver
    Depleted,
}

/// Anything that can be damaged. Collisions and projectiles call this
/// directly instead of dispatching by name.
pub trait DamageReceiver {
    fn add_damage(&mut self, amount: u32) -> DamageOutcome;
}

/// Health component for damageable entities
#[derive(Component, Debug, Clone)]
pub struct Health {
    pub current: u32,
    pub max: u32,
    invincible: bool,
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self {
            current: max,
            max,
            invincible: false,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.current == 0
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible
    }

    pub fn set_invincible(&mut self, invincible: bool) {
        self.invincible = invincible;
    }

    /// Back to full, used when a pooled instance is reused.
    pub fn restore(&mut self) {
        self.current = self.max;
        self.invincible = false;
    }
}

impl DamageReceiver for Health {
    fn add_damage(&mut self, amount: u32) -> DamageOutcome {
        if self.invincible || self.is_dead() || amount == 0 {
            return DamageOutcome::Ignored;
        }

        self.current = self.current.saturating_sub(amount);
        if self.is_dead() {
            DamageOutcome::Depleted
        } else {
            DamageOutcome::Hurt {
                remaining: self.current,
            }
        }
    }
}

/// Damage dealt to the player on touch
#[derive(Component, Debug, Clone, Copy)]
pub struct ContactDamage(pub u32);
