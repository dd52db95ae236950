pub mod features;
pub mod settings;

pub use features::{disable_flags, supported, Feature};
pub use settings::targets::{BrowserTargets, UNSUPPORTED};
