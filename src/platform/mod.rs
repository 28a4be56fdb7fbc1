//! Platform abstraction layer
//!
//! Bridges input sources running outside the tick loop into per-tick commands.

pub mod input;

pub use input::SharedInput;
