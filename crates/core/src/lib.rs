pub mod config;
pub mod error;
pub mod logging;
pub mod registry;
pub mod scanner;
pub mod stanza;
pub mod sync;

pub use config::{AssetGroup, AssetTypeTable, SyncConfig};
pub use error::{MgcbError, Result};
pub use sync::{ContentSync, SyncPlan, SyncReport};
