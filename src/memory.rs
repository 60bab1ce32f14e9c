use log::{info, warn};

use crate::error::{ConfigError, StorageError};

/// One fixed-size slot of physical memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    free: bool,
    data: Box<[u8]>,
}

impl Frame {
    fn zeroed(page_size: usize) -> Result<Self, StorageError> {
        let mut data = Vec::new();
        data.try_reserve_exact(page_size)
            .map_err(|_| StorageError::Exhausted { bytes: page_size })?;
        data.resize(page_size, 0u8);
        Ok(Frame {
            free: true,
            data: data.into_boxed_slice(),
        })
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        self.free
    }

    /// Raw contents, always `page_size` bytes long
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// The frame table: a fixed pool of frames with per-frame storage.
///
/// The number of frames is fixed at construction. A frame's `free` flag is the
/// only thing deciding whether it may be handed out; mutation of that flag is
/// crate-private so that it only happens through the allocator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhysicalMemory {
    total_size: usize,
    page_size: usize,
    frames: Vec<Frame>,
}

impl PhysicalMemory {
    /// Create a physical memory of `total_size` bytes split into `page_size` frames.
    ///
    /// Any remainder of `total_size / page_size` is unaddressable. A memory that
    /// cannot hold a single frame is rejected.
    pub fn new(total_size: usize, page_size: usize) -> crate::Result<Self> {
        if page_size == 0 {
            return Err(ConfigError::ZeroPageSize.into());
        }
        if total_size == 0 {
            return Err(ConfigError::ZeroMemorySize.into());
        }
        let num_frames = total_size / page_size;
        if num_frames == 0 {
            return Err(ConfigError::NoFrames {
                memory_size: total_size,
                page_size,
            }
            .into());
        }

        let mut frames = Vec::new();
        frames
            .try_reserve_exact(num_frames)
            .map_err(|_| StorageError::Exhausted { bytes: total_size })?;
        for _ in 0..num_frames {
            frames.push(Frame::zeroed(page_size)?);
        }

        let memory = PhysicalMemory {
            total_size,
            page_size,
            frames,
        };
        if memory.unaddressable_bytes() > 0 {
            warn!(
                "{} bytes of physical memory are not a multiple of the {}-byte page size and will be unaddressable",
                memory.unaddressable_bytes(),
                page_size
            );
        }
        info!(
            "physical memory ready: {} bytes, {} frames of {} bytes",
            total_size, num_frames, page_size
        );
        Ok(memory)
    }

    #[inline]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    #[inline]
    pub fn total_size(&self) -> usize {
        self.total_size
    }

    #[inline]
    pub fn num_frames(&self) -> usize {
        self.frames.len()
    }

    /// Bytes past the last whole frame
    pub fn unaddressable_bytes(&self) -> usize {
        self.total_size - self.num_frames() * self.page_size
    }

    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// All frames in ascending index order
    pub fn frames(&self) -> impl Iterator<Item = (usize, &Frame)> + '_ {
        self.frames.iter().enumerate()
    }

    pub fn is_free(&self, index: usize) -> bool {
        self.frames.get(index).is_some_and(Frame::is_free)
    }

    pub fn free_count(&self) -> usize {
        self.frames.iter().filter(|f| f.free).count()
    }

    /// Read one byte of a frame
    pub fn read(&self, frame: usize, offset: usize) -> Option<u8> {
        self.frames.get(frame)?.data.get(offset).copied()
    }

    /// Indices of free frames, ascending. Each call rescans the current state.
    pub(crate) fn free_frames(&self) -> impl Iterator<Item = usize> + '_ {
        self.frames
            .iter()
            .enumerate()
            .filter_map(|(index, frame)| frame.free.then_some(index))
    }

    pub(crate) fn mark_occupied(&mut self, index: usize) {
        debug_assert!(self.frames[index].free, "frame {index} reserved twice");
        self.frames[index].free = false;
    }

    pub(crate) fn mark_free(&mut self, index: usize) {
        self.frames[index].free = true;
    }

    pub(crate) fn write(&mut self, frame: usize, offset: usize, value: u8) {
        self.frames[frame].data[offset] = value;
    }

    /// Zero a frame's contents
    pub(crate) fn clear(&mut self, frame: usize) {
        self.frames[frame].data.fill(0);
    }
}
