pub mod error;
pub mod executor;
pub mod guard;
pub mod notifier;
pub mod platform;
pub mod rapsheet;
pub mod store;

pub use error::{ExecutionError, PlatformError, StoreError};
pub use guard::{Capability, authorize, require};
pub use platform::Platform;
pub use rapsheet::RapSheet;
pub use store::{AuditStore, MongoAuditStore};
