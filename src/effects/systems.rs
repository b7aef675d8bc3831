//! Effects domain: per-frame scheduler for visual tasks.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::effects::CancelVisualTask;
use crate::effects::task::{TaskPoll, VisualTask};

pub(crate) fn tick_visual_tasks(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut VisualTask, &mut Sprite)>,
) {
    let dt = time.delta_secs();
    for (entity, mut task, mut sprite) in &mut query {
        match task.advance(dt) {
            TaskPoll::Pending(tint) => sprite.color = tint,
            TaskPoll::Done(rest) => {
                sprite.color = rest;
                commands.entity(entity).remove::<VisualTask>();
            }
        }
    }
}

/// Aborting a task puts the entity back on its rest colour.
pub(crate) fn cancel_visual_tasks(
    mut commands: Commands,
    mut cancel_events: MessageReader<CancelVisualTask>,
    mut query: Query<(&mut VisualTask, &mut Sprite)>,
) {
    for event in cancel_events.read() {
        let Ok((mut task, mut sprite)) = query.get_mut(event.entity) else {
            continue;
        };
        debug!("Cancelling '{}' task on {:?}", task.label(), event.entity);
        sprite.color = task.cancel();
        commands.entity(event.entity).remove::<VisualTask>();
    }
}
