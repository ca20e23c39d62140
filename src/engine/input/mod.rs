//! Input handling module
//! Keyboard and mouse state captured from window events into fixed-size arrays.

pub mod handler;

pub use handler::{key_code, keys, mouse_button_code, InputState, MAX_KEYS, MAX_MOUSE_BUTTONS};
