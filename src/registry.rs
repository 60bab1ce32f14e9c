use log::debug;

use crate::error::{AllocationError, LookupError};
use crate::page_table::{Process, ProcessId};

/// Insertion-ordered, bounded set of live processes.
///
/// Duplicate ids are accepted here; [`Registry::lookup`] resolves them to the
/// earliest-registered process. Whether duplicates may be created at all is
/// decided one level up, in the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    processes: Vec<Process>,
    capacity: usize,
}

impl Registry {
    pub fn with_capacity(capacity: usize) -> Self {
        Registry {
            processes: Vec::with_capacity(capacity),
            capacity,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.processes.len() >= self.capacity
    }

    /// Append a process. When full, the process is returned alongside the error.
    pub fn register(&mut self, process: Process) -> Result<&Process, (AllocationError, Process)> {
        if self.is_full() {
            return Err((
                AllocationError::RegistryFull {
                    capacity: self.capacity,
                },
                process,
            ));
        }
        debug!(
            "registered process {} in slot {}",
            process.id(),
            self.processes.len()
        );
        self.processes.push(process);
        Ok(&self.processes[self.processes.len() - 1])
    }

    /// First process with this id, in insertion order
    pub fn lookup(&self, id: ProcessId) -> Result<&Process, LookupError> {
        self.processes
            .iter()
            .find(|p| p.id() == id)
            .ok_or(LookupError::NotFound(id))
    }

    pub fn contains(&self, id: ProcessId) -> bool {
        self.processes.iter().any(|p| p.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Process> + '_ {
        self.processes.iter()
    }

    /// Pages held by all live processes
    pub fn total_pages(&self) -> usize {
        self.processes.iter().map(Process::num_pages).sum()
    }
}
