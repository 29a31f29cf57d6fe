//! fieldops-core
//!
//! Pure route-geometry and inbox-filter engines for a field-service
//! planner. Rendering, transport and persistence stay with the caller;
//! these modules take plain data and return plain data.

pub mod error;
pub mod traits;
pub mod polyline;
pub mod haversine;
pub mod geometry;
pub mod filter;
pub mod snap;

pub use error::Error;
