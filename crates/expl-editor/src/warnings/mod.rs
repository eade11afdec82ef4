mod engine;
mod params;
mod reachability;

pub use engine::{compute_warnings, WarningsInput, WarningsService};
