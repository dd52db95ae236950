pub mod targets;

pub use targets::{BrowserTargets, UNSUPPORTED};
