//! Physics error types

use std::fmt;

use crate::body::BallKey;

/// Error constructing a ball
#[derive(Debug, Clone, PartialEq)]
pub enum BallError {
    /// Mass must be finite and strictly positive
    InvalidMass(f64),
    /// Radius must be finite and strictly positive
    InvalidRadius(f64),
    /// Position or velocity contains NaN or infinity
    NonFinite,
}

impl fmt::Display for BallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BallError::InvalidMass(m) => write!(f, "Invalid ball mass: {} (must be > 0)", m),
            BallError::InvalidRadius(r) => write!(f, "Invalid ball radius: {} (must be > 0)", r),
            BallError::NonFinite => write!(f, "Ball position or velocity is not finite"),
        }
    }
}

impl std::error::Error for BallError {}

/// Error constructing wall bounds
#[derive(Debug, Clone, PartialEq)]
pub enum BoundsError {
    /// A minimum is not below its maximum
    Inverted {
        axis: &'static str,
        min: f64,
        max: f64,
    },
    /// A bound is NaN or infinite
    NonFinite,
}

impl fmt::Display for BoundsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundsError::Inverted { axis, min, max } => {
                write!(f, "Wall bounds inverted on {}: min {} >= max {}", axis, min, max)
            }
            BoundsError::NonFinite => write!(f, "Wall bounds are not finite"),
        }
    }
}

impl std::error::Error for BoundsError {}

/// Unified error type for the physics world
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// Ball construction failed
    Ball(BallError),
    /// Wall bounds construction failed
    Bounds(BoundsError),
    /// A step produced NaN or infinity for this ball
    NonFiniteState(BallKey),
    /// The key does not refer to a live ball
    UnknownBall(BallKey),
}

impl From<BallError> for PhysicsError {
    fn from(e: BallError) -> Self {
        PhysicsError::Ball(e)
    }
}

impl From<BoundsError> for PhysicsError {
    fn from(e: BoundsError) -> Self {
        PhysicsError::Bounds(e)
    }
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicsError::Ball(e) => write!(f, "Ball error: {}", e),
            PhysicsError::Bounds(e) => write!(f, "Bounds error: {}", e),
            PhysicsError::NonFiniteState(key) => {
                write!(f, "Non-finite physics state for ball {:?}", key)
            }
            PhysicsError::UnknownBall(key) => write!(f, "Unknown ball {:?}", key),
        }
    }
}

impl std::error::Error for PhysicsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PhysicsError::Ball(e) => Some(e),
            PhysicsError::Bounds(e) => Some(e),
            PhysicsError::NonFiniteState(_) | PhysicsError::UnknownBall(_) => None,
        }
    }
}
