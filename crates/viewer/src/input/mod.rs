//! Input adapters: translate keys and pointer timing into navigation commands

pub mod dwell;
pub mod keyboard;

pub use dwell::{DwellSelector, IdleReset, PointerTimers};
pub use keyboard::{dispatch, handle_key, map_key, InputAction, Key};
