//! Core types: instance handles, geometry, RNG, configuration, errors.
//!
//! Everything here is independent of how a hand is assembled; the `cards`,
//! `pools` and `hand` modules build on these.

pub mod config;
pub mod entity;
pub mod error;
pub mod geometry;
pub mod rng;

pub use config::{FinishOverride, HandConfig, MotionConfig};
pub use entity::{InstanceAllocator, InstanceId};
pub use error::{HandError, HandResult};
pub use geometry::{lerp, lerp_scalar, smoothing_factor, Rotation, Vec2};
pub use rng::{HandRng, HandRngState};
