//! Visibility and lighting.
//!
//! [`Shadowcaster`] owns a reusable light buffer; the free function
//! [`compute_lighting`] is the one-shot form returning an owned field.
//! [`ExploredMap`] accumulates lit cells across queries for fog-of-war.

mod light;
mod shadowcast;

pub use light::{ExploredMap, LightField};
pub use shadowcast::{Shadowcaster, compute_lighting};
