//! Finish-line countdown and race outcome

use serde::{Deserialize, Serialize};

/// Race outcome. Only ever leaves `Continuing`, never returns to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RaceOutcome {
    #[default]
    Continuing,
    Won,
    Lost,
}

impl RaceOutcome {
    #[inline]
    pub fn is_over(&self) -> bool {
        *self != RaceOutcome::Continuing
    }

    /// Text for the HUD, if any
    pub fn hud_text(&self) -> Option<&'static str> {
        match self {
            RaceOutcome::Continuing => None,
            RaceOutcome::Won => Some("You Win!"),
            RaceOutcome::Lost => Some("Game Over!"),
        }
    }
}

/// Distance left until the finish line reaches the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceState {
    finish_distance: f32,
    remaining_distance: f32,
    outcome: RaceOutcome,
}

impl RaceState {
    pub fn new(finish_distance: f32) -> Self {
        Self {
            finish_distance,
            remaining_distance: finish_distance,
            outcome: RaceOutcome::Continuing,
        }
    }

    #[inline]
    pub fn outcome(&self) -> RaceOutcome {
        self.outcome
    }

    #[inline]
    pub fn finish_distance(&self) -> f32 {
        self.finish_distance
    }

    #[inline]
    pub fn remaining_distance(&self) -> f32 {
        self.remaining_distance
    }

    /// Distance scrolled so far
    #[inline]
    pub fn travelled(&self) -> f32 {
        self.finish_distance - self.remaining_distance
    }

    /// Screen x of the finish line for a player standing at `player_x`
    #[inline]
    pub fn finish_line_x(&self, player_x: f32) -> f32 {
        player_x + self.remaining_distance
    }

    /// Scroll the finish line toward the player. No-op once the race is over.
    pub fn advance(&mut self, speed: f32, dt: f32) {
        if self.outcome.is_over() {
            return;
        }
        self.remaining_distance = (self.remaining_distance - speed * dt).max(0.0);
    }

    /// Settle the outcome for this frame. A collision beats reaching the
    /// line on the same frame.
    pub fn judge(&mut self, collided: bool) -> RaceOutcome {
        if self.outcome.is_over() {
            return self.outcome;
        }

        if collided {
            self.outcome = RaceOutcome::Lost;
        } else if self.remaining_distance <= 0.0 {
            self.outcome = RaceOutcome::Won;
        }
        self.outcome
    }
}
