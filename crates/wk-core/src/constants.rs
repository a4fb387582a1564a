//! Global constants for wk-core

/// Default pick radius around a screen point, in pixels
pub const DEFAULT_PROXIMITY: f32 = 12.0;

/// Multiplicative step applied per wheel notch to arcball radius/scale
pub const WHEEL_STEP: f32 = 1.05;

/// Smallest arcball display radius the wheel may shrink to, in pixels
pub const MIN_RADIUS: f32 = 1.0;

/// Largest arcball display radius the wheel may grow to, in pixels
pub const MAX_RADIUS: f32 = 1e5;

/// Smallest arcball scale the wheel may shrink to
pub const MIN_SCALE: f32 = 1e-3;

/// Largest arcball scale the wheel may grow to
pub const MAX_SCALE: f32 = 1e3;

/// Denominator below which a ray is treated as parallel to a plane
pub const PARALLEL_EPSILON: f32 = 1e-6;

/// Squared axis length below which a rotation is treated as identity
pub const AXIS_EPSILON: f32 = 1e-12;

/// Default toggler button diameter, in pixels
pub const TOGGLER_DIAMETER: f32 = 12.0;

/// Default magnifier block size (screen pixels per source pixel)
pub const MAGNIFIER_BLOCK_SIZE: i32 = 20;
