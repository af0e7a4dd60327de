//! ARF Rate Control - Core traits, types, and constants.
//!
//! This module provides the foundational types shared by the PHY description
//! and the rate adaptation engine. It has minimal dependencies and defines the
//! interfaces the engine consumes from the surrounding transmit pipeline.

mod address;
mod constants;
mod error;
mod traits;

pub use address::*;
pub use constants::*;
pub use error::*;
pub use traits::*;
