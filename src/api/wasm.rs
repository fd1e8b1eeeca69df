//! JS-facing types. The facade lives next to the simulation it wraps.

pub use crate::simulation::{PerfStats, Territory};
