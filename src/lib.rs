pub mod allocator;
pub mod config;
pub mod constants;
pub mod error;
pub mod inspect;
pub mod io;
pub mod logger;
pub mod memory;
pub mod page_table;
pub mod registry;
pub mod rng;
pub mod session;

// Re-export commonly used items for convenience
pub use config::SimConfig;
pub use error::{AllocationError, ConfigError, Error, LookupError, Result, StorageError, ValidationError};
pub use memory::{Frame, PhysicalMemory};
pub use page_table::{PageTable, PageTableEntry, Process, ProcessId};
pub use registry::Registry;
pub use session::Session;
