//! Service selectors.
//!
//! - `caching`: the scheduled, snapshot-serving selector.
//! - `factory`: builds started selectors sharing one client and scheduler.
//! - `stats`: refresh outcomes and counters.

pub mod caching;
pub mod factory;
pub mod stats;


pub use caching::{CachingServiceSelector, SelectorState};
pub use factory::ServiceSelectorFactory;
pub use stats::{RefreshOutcome, RefreshStats};
