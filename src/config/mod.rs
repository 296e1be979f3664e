pub mod freshness;
pub mod manager;
pub mod store;

pub use freshness::{ConfigService, RefreshOutcome};
pub use store::ConfigStore;
