//! Effects domain: step-based visual tasks.
//!
//! A task is a queue of timed steps. The scheduler advances it once per frame
//! and applies the resulting tint. Leftover frame time flows into the next
//! step, so a long frame can finish several steps at once.

use std::collections::VecDeque;

use bevy::color::Alpha;
use bevy::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub enum TaskStep {
    /// Hold the current tint
    Wait { secs: f32 },
    /// Show a solid colour
    Flash { color: Color, secs: f32 },
    /// Alternate between `color` and the rest colour every `period`
    Blink { color: Color, period: f32, secs: f32 },
    Fade { from: Color, to: Color, secs: f32 },
}

impl TaskStep {
    pub fn duration(&self) -> f32 {
        match self {
            TaskStep::Wait { secs }
            | TaskStep::Flash { secs, .. }
            | TaskStep::Blink { secs, .. }
            | TaskStep::Fade { secs, .. } => secs.max(0.0),
        }
    }

    fn tint(&self, elapsed: f32, held: Color, rest: Color) -> Color {
        match self {
            TaskStep::Wait { .. } => held,
            TaskStep::Flash { color, .. } => *color,
            TaskStep::Blink { color, period, .. } => {
                let phase = (elapsed / period.max(f32::EPSILON)) as u32;
                if phase % 2 == 0 { *color } else { rest }
            }
            TaskStep::Fade { from, to, secs } => {
                let t = if *secs > 0.0 {
                    (elapsed / secs).clamp(0.0, 1.0)
                } else {
                    1.0
                };
                lerp_color(*from, *to, t)
            }
        }
    }
}

pub(crate) fn lerp_color(from: Color, to: Color, t: f32) -> Color {
    let a = from.to_srgba();
    let b = to.to_srgba();
    Color::srgba(
        a.red + (b.red - a.red) * t,
        a.green + (b.green - a.green) * t,
        a.blue + (b.blue - a.blue) * t,
        a.alpha + (b.alpha - a.alpha) * t,
    )
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TaskPoll {
    Pending(Color),
    Done(Color),
}

impl TaskPoll {
    pub fn tint(self) -> Color {
        match self {
            TaskPoll::Pending(color) | TaskPoll::Done(color) => color,
        }
    }
}

/// Durations of the stock task sequences.
#[derive(Resource, Debug, Clone)]
pub struct FlashTuning {
    pub hit_flash_secs: f32,
    pub invulnerability_secs: f32,
    pub blink_period: f32,
    pub room_fade_secs: f32,
}

impl Default for FlashTuning {
    fn default() -> Self {
        Self {
            hit_flash_secs: 0.1,
            invulnerability_secs: 1.0,
            blink_period: 0.1,
            room_fade_secs: 0.25,
        }
    }
}

#[derive(Component, Debug, Clone)]
pub struct VisualTask {
    label: &'static str,
    steps: VecDeque<TaskStep>,
    elapsed: f32,
    tint: Color,
    rest_color: Color,
}

impl VisualTask {
    /// `rest_color` is where the entity ends up when the task finishes or is
    /// cancelled.
    pub fn new(
        label: &'static str,
        rest_color: Color,
        steps: impl IntoIterator<Item = TaskStep>,
    ) -> Self {
        Self {
            label,
            steps: steps.into_iter().collect(),
            elapsed: 0.0,
            tint: rest_color,
            rest_color,
        }
    }

    pub fn fade(from: Color, to: Color, secs: f32) -> Self {
        let mut task = Self::new("fade", to, [TaskStep::Fade { from, to, secs }]);
        task.tint = from;
        task
    }

    /// White hit flash followed by the invulnerability blink.
    pub fn hit_flash(rest_color: Color, tuning: &FlashTuning) -> Self {
        Self::new(
            "hit_flash",
            rest_color,
            [
                TaskStep::Flash {
                    color: Color::WHITE,
                    secs: tuning.hit_flash_secs,
                },
                TaskStep::Blink {
                    color: rest_color.with_alpha(0.25),
                    period: tuning.blink_period,
                    secs: tuning.invulnerability_secs,
                },
            ],
        )
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn rest_color(&self) -> Color {
        self.rest_color
    }

    pub fn current_step(&self) -> Option<&TaskStep> {
        self.steps.front()
    }

    pub fn is_finished(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn advance(&mut self, dt: f32) -> TaskPoll {
        let mut remaining = dt.max(0.0);

        while let Some(step) = self.steps.front() {
            let duration = step.duration();
            let available = duration - self.elapsed;

            if remaining < available {
                self.elapsed += remaining;
                self.tint = step.tint(self.elapsed, self.tint, self.rest_color);
                return TaskPoll::Pending(self.tint);
            }

            remaining -= available;
            self.tint = step.tint(duration, self.tint, self.rest_color);
            self.steps.pop_front();
            self.elapsed = 0.0;
        }

        self.tint = self.rest_color;
        TaskPoll::Done(self.rest_color)
    }

    /// Abandons the remaining steps. Returns the colour to restore.
    pub fn cancel(&mut self) -> Color {
        self.steps.clear();
        self.elapsed = 0.0;
        self.tint = self.rest_color;
        self.rest_color
    }
}
