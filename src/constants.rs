//! Application-wide constants
//!
//! Centralizes magic numbers to make them discoverable.

/// Name the Gemini API key is stored under (env var and keyring entry).
pub const API_KEY_NAME: &str = "GEMINI_API_KEY";

/// Model used for every generation. Not user-configurable.
pub const GEMINI_MODEL: &str = "models/gemini-1.5-flash";

/// Default Gemini REST endpoint.
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Input poll timeout while idle, in milliseconds.
pub const IDLE_POLL_MS: u64 = 150;

/// Input poll timeout while a generation is in flight.
/// Shorter so the spinner keeps moving.
pub const BUSY_POLL_MS: u64 = 50;

/// Error message display duration in seconds before auto-dismiss.
pub const ERROR_TTL_SECS: u64 = 8;

/// Spinner animation frame duration in milliseconds.
pub const SPINNER_FRAME_MS: u128 = 80;

// === Form layout ===

/// Height of the source message box, borders included.
pub const MESSAGE_BOX_HEIGHT: u16 = 9;

/// Height of the intent checkbox panel: two rows of three plus summary.
pub const INTENT_PANEL_HEIGHT: u16 = 5;

/// Height of single-line inputs and the generate button.
pub const SINGLE_LINE_HEIGHT: u16 = 3;

/// Intent checkboxes per row.
pub const INTENTS_PER_ROW: usize = 3;
