use crate::constants::MAX_PROCESSES;
use crate::error::ConfigError;

/// Startup parameters of a simulation session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    pub physical_memory_size: usize,
    pub page_size: usize,
    /// Largest process the session accepts; enforced before allocation
    pub max_process_size: usize,
    pub max_processes: usize,
    /// `None` seeds the content generator from the clock
    pub seed: Option<u64>,
    pub allow_duplicate_ids: bool,
}

impl SimConfig {
    pub fn new(physical_memory_size: usize, page_size: usize, max_process_size: usize) -> Self {
        SimConfig {
            physical_memory_size,
            page_size,
            max_process_size,
            max_processes: MAX_PROCESSES,
            seed: None,
            allow_duplicate_ids: false,
        }
    }

    pub fn with_max_processes(mut self, max_processes: usize) -> Self {
        self.max_processes = max_processes;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_duplicate_ids(mut self, allow: bool) -> Self {
        self.allow_duplicate_ids = allow;
        self
    }

    pub fn num_frames(&self) -> usize {
        self.physical_memory_size.checked_div(self.page_size).unwrap_or(0)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        if self.physical_memory_size == 0 {
            return Err(ConfigError::ZeroMemorySize);
        }
        if self.num_frames() == 0 {
            return Err(ConfigError::NoFrames {
                memory_size: self.physical_memory_size,
                page_size: self.page_size,
            });
        }
        if self.max_process_size == 0 {
            return Err(ConfigError::ZeroMaxProcessSize);
        }
        if self.max_processes == 0 {
            return Err(ConfigError::ZeroRegistryCapacity);
        }
        Ok(())
    }
}
