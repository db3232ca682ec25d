//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and the timing/shape parameters of
//! the map highlight.

use std::time::Duration;

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Hallmap";

/// The binary name of the application (used in command examples, lowercase).
pub const APP_BINARY_NAME: &str = "hallmap";

/// Interval between visibility toggles of a blinking map highlight.
pub const BLINK_INTERVAL: Duration = Duration::from_millis(300);

/// Number of visibility toggles a blink cycle performs before the
/// highlight is cleared. Even so the highlight ends in its visible
/// phase right before removal.
pub const BLINK_TOGGLES: u8 = 6;

/// Zoom divisors the map view cycles through. Larger divisors shrink
/// the device-space map so more of the venue fits on screen.
pub const ZOOM_DIVISORS: [u32; 3] = [1, 2, 4];

/// Highest favorite color bucket. Buckets run 1..=9; 0 means uncolored.
pub const MAX_FAVORITE_COLOR: u8 = 9;
