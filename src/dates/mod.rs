pub mod provider;

pub use provider::{DateProvider, LiveDateProvider, SimulatedDateProvider, parse_date};
