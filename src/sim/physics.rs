//! Player vertical kinematics and ground resolution
//!
//! Simple Euler integration: gravity is additive each tick, so results are
//! reproducible given an identical tick cadence. No wall-clock input.

use super::state::Player;
use crate::consts::*;

impl Player {
    /// Advance vertical kinematics by one tick
    pub fn apply_gravity(&mut self, gravity: f32) {
        self.vy += gravity;
        self.pos.y += self.vy;
    }

    /// Clamp to the ground if the runner reached or passed it, zeroing
    /// velocity and restoring both jump charges.
    ///
    /// Returns true exactly on the tick where the clamp transitions from
    /// airborne to grounded, so the caller can emit a landing cue.
    pub fn resolve_ground(&mut self, ground_y: f32) -> bool {
        if self.pos.y < ground_y {
            return false;
        }
        let was_airborne = self.jumps < MAX_JUMPS;
        self.pos.y = ground_y;
        self.vy = 0.0;
        self.jumps = MAX_JUMPS;
        was_airborne
    }

    /// Spend a jump charge if one remains. Calling with zero charges is
    /// valid and expected (mid-air spam); it is a silent no-op.
    ///
    /// Returns true when a charge was spent, so the caller can emit a cue.
    pub fn jump(&mut self) -> bool {
        if self.jumps == 0 {
            return false;
        }
        self.vy = JUMP_IMPULSE;
        self.jumps -= 1;
        true
    }
}
