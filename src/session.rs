//! A simulation session: one physical memory, one process registry.
//!
//! This is the only surface the menu talks to. Validation of caller input
//! (size limits, duplicate ids, registry capacity) happens here, before the
//! allocator touches any frame.

use std::io::Write;
use std::num::NonZeroUsize;

use log::info;

use crate::allocator;
use crate::config::SimConfig;
use crate::error::{AllocationError, LookupError, Result, ValidationError};
use crate::inspect;
use crate::memory::PhysicalMemory;
use crate::page_table::{Process, ProcessId};
use crate::registry::Registry;
use crate::rng::Xorshift64;

#[derive(Debug)]
pub struct Session {
    config: SimConfig,
    memory: PhysicalMemory,
    registry: Registry,
    rng: Xorshift64,
}

impl Session {
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;
        let memory = PhysicalMemory::new(config.physical_memory_size, config.page_size)?;
        let registry = Registry::with_capacity(config.max_processes);
        let rng = match config.seed {
            Some(seed) => Xorshift64::with_seed(seed),
            None => Xorshift64::from_time(),
        };
        Ok(Session {
            config,
            memory,
            registry,
            rng,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn memory(&self) -> &PhysicalMemory {
        &self.memory
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Validate, allocate and register a new process.
    ///
    /// Checks run in this order: zero size, size limit, duplicate id, registry
    /// capacity, free frames. A failure at any step leaves the session unchanged.
    pub fn create_process(&mut self, id: ProcessId, size: usize) -> Result<&Process> {
        let size = NonZeroUsize::new(size).ok_or(ValidationError::ZeroSize)?;
        if size.get() > self.config.max_process_size {
            return Err(ValidationError::SizeExceedsLimit {
                size: size.get(),
                limit: self.config.max_process_size,
            }
            .into());
        }
        if !self.config.allow_duplicate_ids && self.registry.contains(id) {
            return Err(ValidationError::DuplicateProcessId(id).into());
        }
        if self.registry.is_full() {
            return Err(AllocationError::RegistryFull {
                capacity: self.registry.capacity(),
            }
            .into());
        }

        let process = allocator::create_process(id, size, &mut self.memory, &mut self.rng)?;
        info!(
            "created process {} ({} bytes, {} pages), {} frames left",
            id,
            process.size(),
            process.num_pages(),
            self.memory.free_count()
        );

        match self.registry.register(process) {
            Ok(process) => Ok(process),
            Err((err, process)) => {
                allocator::release(&process, &mut self.memory);
                Err(err.into())
            }
        }
    }

    pub fn lookup(&self, id: ProcessId) -> std::result::Result<&Process, LookupError> {
        self.registry.lookup(id)
    }

    pub fn dump_memory<W: Write>(&self, out: &mut W) -> Result<()> {
        inspect::dump_memory(&self.memory, out)?;
        Ok(())
    }

    pub fn dump_page_table<W: Write>(&self, id: ProcessId, out: &mut W) -> Result<()> {
        let process = self.lookup(id)?;
        inspect::dump_page_table(process, out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn session(memory: usize, page: usize, max: usize) -> Session {
        Session::new(SimConfig::new(memory, page, max).with_seed(3)).unwrap()
    }

    #[test]
    fn test_rejects_invalid_config() {
        let err = Session::new(SimConfig::new(100, 0, 10)).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_create_and_lookup() {
        let mut s = session(50, 10, 50);
        let p = s.create_process(ProcessId(1), 25).unwrap();
        assert_eq!(p.num_pages(), 3);
        assert_eq!(s.lookup(ProcessId(1)).unwrap().size(), 25);
        assert_eq!(s.memory().free_count(), 2);
    }

    #[test]
    fn test_validation_errors_leave_state_alone() {
        let mut s = session(50, 10, 30);
        s.create_process(ProcessId(1), 10).unwrap();
        let memory = s.memory().clone();
        let registry = s.registry().clone();

        assert!(matches!(
            s.create_process(ProcessId(2), 0),
            Err(Error::Validation(ValidationError::ZeroSize))
        ));
        assert!(matches!(
            s.create_process(ProcessId(2), 31),
            Err(Error::Validation(ValidationError::SizeExceedsLimit { size: 31, limit: 30 }))
        ));
        assert!(matches!(
            s.create_process(ProcessId(1), 10),
            Err(Error::Validation(ValidationError::DuplicateProcessId(ProcessId(1))))
        ));

        assert_eq!(s.memory(), &memory);
        assert_eq!(s.registry(), &registry);
    }

    #[test]
    fn test_insufficient_frames_is_recoverable() {
        let mut s = session(30, 10, 100);
        s.create_process(ProcessId(1), 20).unwrap();
        assert!(matches!(
            s.create_process(ProcessId(2), 20),
            Err(Error::Allocation(AllocationError::InsufficientFrames { requested: 2, available: 1, .. }))
        ));
        assert_eq!(s.memory().free_count(), 1);
        assert_eq!(s.registry().len(), 1);

        // the session keeps going
        s.create_process(ProcessId(3), 10).unwrap();
        assert_eq!(s.memory().free_count(), 0);
    }

    #[test]
    fn test_registry_full_checked_before_allocation() {
        let mut s = Session::new(SimConfig::new(100, 10, 100).with_max_processes(2).with_seed(1)).unwrap();
        s.create_process(ProcessId(1), 10).unwrap();
        s.create_process(ProcessId(2), 10).unwrap();

        assert!(matches!(
            s.create_process(ProcessId(3), 10),
            Err(Error::Allocation(AllocationError::RegistryFull { capacity: 2 }))
        ));
        assert_eq!(s.memory().free_count(), 8);
    }

    #[test]
    fn test_duplicates_allowed_when_configured() {
        let mut s = Session::new(SimConfig::new(100, 10, 100).with_duplicate_ids(true).with_seed(1)).unwrap();
        s.create_process(ProcessId(1), 10).unwrap();
        s.create_process(ProcessId(1), 20).unwrap();
        assert_eq!(s.registry().len(), 2);
        assert_eq!(s.lookup(ProcessId(1)).unwrap().size(), 10);
    }

    #[test]
    fn test_dump_page_table_unknown_process() {
        let s = session(50, 10, 50);
        let mut out = Vec::new();
        assert!(matches!(
            s.dump_page_table(ProcessId(9), &mut out),
            Err(Error::Lookup(LookupError::NotFound(ProcessId(9))))
        ));
        assert!(out.is_empty());
    }
}
