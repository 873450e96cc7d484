//! Layout calculation modules
//!
//! This module handles all the geometric calculations for a poster:
//! - Resolution of ratio-based parameters into absolute geometry
//! - Position queries for covers, captions, title and signatures
//! - Year shading bands over the cover grid

mod positions;
mod resolve;
mod shading;
mod types;

pub use resolve::*;
pub use shading::*;
pub use types::*;
