//! Precondition errors raised by the simulation

/// Invalid construction input or an illegal lifecycle request
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimError {
    #[error("arena must have positive finite dimensions, got {width}x{height}")]
    InvalidArena { width: f32, height: f32 },

    #[error("speed modifier {0} is outside the accepted range")]
    InvalidSpeedModifier(f32),

    #[error("invalid player geometry: pos=({x}, {y}) size={size} speed={speed}")]
    InvalidPlayer { x: f32, y: f32, size: f32, speed: f32 },

    #[error("invalid tuning: {0}")]
    InvalidTuning(&'static str),

    #[error("the current run has not ended")]
    NotGameOver,
}
