//! Cross-thread input flags
//!
//! Key handlers write plain atomic booleans; the tick loop samples them once
//! per tick. Only the tick loop touches simulation state.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::sim::state::Intent;
use crate::sim::tick::TickInput;

#[derive(Debug, Default)]
struct Flags {
    left: AtomicBool,
    right: AtomicBool,
    up: AtomicBool,
    down: AtomicBool,
    pause: AtomicBool,
    autopilot: AtomicBool,
}

/// Cloneable handle shared between the input source and the tick loop
#[derive(Debug, Clone, Default)]
pub struct SharedInput {
    flags: Arc<Flags>,
}

/// Directions a key can map to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Arrow keys and WASD
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "left" | "arrowleft" | "a" => Some(Direction::Left),
            "right" | "arrowright" | "d" => Some(Direction::Right),
            "up" | "arrowup" | "w" => Some(Direction::Up),
            "down" | "arrowdown" | "s" => Some(Direction::Down),
            _ => None,
        }
    }
}

impl SharedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key pressed (`held = true`) or released
    pub fn set_direction(&self, direction: Direction, held: bool) {
        let flag = match direction {
            Direction::Left => &self.flags.left,
            Direction::Right => &self.flags.right,
            Direction::Up => &self.flags.up,
            Direction::Down => &self.flags.down,
        };
        flag.store(held, Ordering::Relaxed);
    }

    /// Queue a pause toggle for the next tick
    pub fn request_pause(&self) {
        self.flags.pause.store(true, Ordering::Relaxed);
    }

    pub fn set_autopilot(&self, on: bool) {
        self.flags.autopilot.store(on, Ordering::Relaxed);
    }

    /// Release every held direction (e.g. on focus loss or restart)
    pub fn clear(&self) {
        for d in [Direction::Left, Direction::Right, Direction::Up, Direction::Down] {
            self.set_direction(d, false);
        }
    }

    /// Read the flags for one tick. The pause request is consumed.
    pub fn sample(&self) -> TickInput {
        let f = &self.flags;
        TickInput {
            intent: Intent {
                left: f.left.load(Ordering::Relaxed),
                right: f.right.load(Ordering::Relaxed),
                up: f.up.load(Ordering::Relaxed),
                down: f.down.load(Ordering::Relaxed),
            },
            pause: f.pause.swap(false, Ordering::Relaxed),
            autopilot: f.autopilot.load(Ordering::Relaxed),
        }
    }
}
