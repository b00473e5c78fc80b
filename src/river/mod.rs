//! Rivers, lakes and their fractal geometry.
//!
//! Each region traces its own drainage network and stores the result as
//! [`RiverEdge`]s. An edge is a straight source/drain pair rendered as a
//! [`MidpointFractal`] polyline, which is what point queries test against.

mod config;
mod edge;
mod fractal;
pub mod geometry;
mod network;

pub use config::RiverConfig;
pub use edge::RiverEdge;
pub use fractal::MidpointFractal;
pub use network::add_rivers_and_lakes;
