//! The attention blink cycle for newly set map highlights.
//!
//! A highlight armed with blinking toggles its visibility six times at
//! a fixed cadence and is then cleared entirely. The machine is driven
//! by the UI tick loop rather than self-scheduled callbacks; every arm
//! or cancel bumps a generation counter, so ticks carrying a stale
//! generation fall through without effect.

use std::time::Instant;

use crate::constants::{BLINK_INTERVAL, BLINK_TOGGLES};

/// Phase of the blink cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlinkPhase {
    /// No blink in progress; the highlight (if any) is steady.
    Idle,
    /// Blinking, with this many visibility toggles left to run.
    Blinking { remaining: u8 },
}

/// Tick-driven blink state for the currently highlighted cell.
///
/// The machine only tracks visibility; the highlight selection itself
/// is owned by the caller, which must drop it when [`Self::tick`]
/// reports the cycle finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlinkState {
    phase: BlinkPhase,
    visible: bool,
    generation: u64,
    next_toggle_at: Option<Instant>,
}

impl BlinkState {
    /// Creates an idle machine.
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: BlinkPhase::Idle,
            visible: true,
            generation: 0,
            next_toggle_at: None,
        }
    }

    /// Generation of the most recent arm or cancel. Ticks must carry
    /// this value to take effect.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the highlight is currently in a visible phase.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether a blink cycle is in progress.
    #[must_use]
    pub const fn is_blinking(&self) -> bool {
        matches!(self.phase, BlinkPhase::Blinking { .. })
    }

    /// Arms the machine for a newly set highlight.
    ///
    /// With `blink` set, a fresh cycle of [`BLINK_TOGGLES`] toggles
    /// starts at `now`; otherwise the highlight is steady. Arming
    /// while a cycle is running restarts it from the beginning.
    /// Returns the new generation.
    pub fn arm(&mut self, blink: bool, now: Instant) -> u64 {
        self.generation += 1;
        self.visible = true;
        if blink {
            self.phase = BlinkPhase::Blinking {
                remaining: BLINK_TOGGLES,
            };
            self.next_toggle_at = Some(now + BLINK_INTERVAL);
        } else {
            self.phase = BlinkPhase::Idle;
            self.next_toggle_at = None;
        }
        self.generation
    }

    /// Cancels any cycle in progress, e.g. because the highlight was
    /// cleared or replaced. Returns the new generation.
    pub fn cancel(&mut self) -> u64 {
        self.generation += 1;
        self.phase = BlinkPhase::Idle;
        self.visible = true;
        self.next_toggle_at = None;
        self.generation
    }

    /// Advances the cycle if a toggle is due at `now`.
    ///
    /// Returns `true` exactly once per cycle: when the final toggle
    /// ran and the caller must clear the highlight. Ticks with a
    /// generation other than [`Self::generation`] are stale and do
    /// nothing, as are ticks before the next toggle deadline.
    pub fn tick(&mut self, generation: u64, now: Instant) -> bool {
        if generation != self.generation {
            return false;
        }
        let BlinkPhase::Blinking { remaining } = self.phase else {
            return false;
        };
        let Some(deadline) = self.next_toggle_at else {
            return false;
        };
        if now < deadline {
            return false;
        }

        self.visible = !self.visible;
        let remaining = remaining - 1;
        if remaining == 0 {
            // Cycle complete: end visible and hand the clear to the
            // caller.
            self.phase = BlinkPhase::Idle;
            self.visible = true;
            self.next_toggle_at = None;
            true
        } else {
            self.phase = BlinkPhase::Blinking { remaining };
            self.next_toggle_at = Some(deadline + BLINK_INTERVAL);
            false
        }
    }
}

impl Default for BlinkState {
    fn default() -> Self {
        Self::new()
    }
}
