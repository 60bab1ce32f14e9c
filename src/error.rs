//! Error taxonomy of the simulator.
//!
//! Everything except [`StorageError`] is recoverable: the session keeps
//! accepting commands after returning one of these to the caller.

use crate::page_table::ProcessId;

pub type Result<T> = std::result::Result<T, Error>;

/// Rejected startup parameters. Raised before any frame state is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("page size must be greater than zero")]
    ZeroPageSize,
    #[error("physical memory size must be greater than zero")]
    ZeroMemorySize,
    #[error("physical memory of {memory_size} bytes cannot hold a single {page_size}-byte frame")]
    NoFrames { memory_size: usize, page_size: usize },
    #[error("maximum process size must be greater than zero")]
    ZeroMaxProcessSize,
    #[error("process registry capacity must be greater than zero")]
    ZeroRegistryCapacity,
}

/// The host could not provide storage for the simulated memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("unable to reserve {bytes} bytes for the simulated physical memory")]
    Exhausted { bytes: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AllocationError {
    #[error("not enough memory to allocate process {id}: {requested} frames needed, {available} free")]
    InsufficientFrames {
        id: ProcessId,
        requested: usize,
        available: usize,
    },
    #[error("process registry is full ({capacity} processes)")]
    RegistryFull { capacity: usize },
}

/// Caller-supplied request rejected before it reaches the allocator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("process size must be greater than zero")]
    ZeroSize,
    #[error("process size {size} exceeds the maximum allowed size of {limit} bytes")]
    SizeExceedsLimit { size: usize, limit: usize },
    #[error("a process with id {0} already exists")]
    DuplicateProcessId(ProcessId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("process {0} not found")]
    NotFound(ProcessId),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Allocation(#[from] AllocationError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Only storage exhaustion ends a session; everything else is reported and survived.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Storage(_))
    }
}
