//! The native window, its rendering context, and per-frame back buffers.

pub mod frame;
pub mod manager;

pub use frame::Frame;
pub use manager::Window;
