//! First-fit frame allocation.
//!
//! A request for `size` bytes needs `ceil(size / page_size)` frames. Frames are
//! taken in ascending index order and marked occupied as soon as they are
//! found. If the scan runs out before the request is met, every frame taken by
//! this attempt is handed back before the error is returned, so a failed
//! request leaves the frame table exactly as it found it.

use std::num::NonZeroUsize;

use log::{debug, trace, warn};

use crate::error::AllocationError;
use crate::memory::PhysicalMemory;
use crate::page_table::{PageTable, Process, ProcessId, pages_for};
use crate::rng::Xorshift64;

/// Frames tentatively taken by one allocation attempt.
///
/// Dropping an uncommitted reservation frees everything it holds.
struct Reservation<'a> {
    memory: &'a mut PhysicalMemory,
    frames: Vec<usize>,
}

impl<'a> Reservation<'a> {
    fn new(memory: &'a mut PhysicalMemory, capacity: usize) -> Self {
        Reservation {
            memory,
            frames: Vec::with_capacity(capacity),
        }
    }

    /// Take up to `wanted` free frames, first fit, in one pass over the table
    fn take_first_fit(&mut self, wanted: usize) {
        let missing = wanted.saturating_sub(self.frames.len());
        let found: Vec<usize> = self.memory.free_frames().take(missing).collect();
        for index in found {
            self.memory.mark_occupied(index);
            debug!("reserved frame {}", index);
            self.frames.push(index);
        }
    }

    fn commit(mut self) -> Vec<usize> {
        std::mem::take(&mut self.frames)
    }
}

impl Drop for Reservation<'_> {
    fn drop(&mut self) {
        for &index in &self.frames {
            self.memory.mark_free(index);
        }
    }
}

/// Create a process of `size` bytes, mapping its pages onto free frames.
///
/// Page `n` is backed by the `n`-th free frame found. On success every byte of
/// the process is filled from `rng`; on failure nothing is changed.
pub fn create_process(
    id: ProcessId,
    size: NonZeroUsize,
    memory: &mut PhysicalMemory,
    rng: &mut Xorshift64,
) -> Result<Process, AllocationError> {
    let size = size.get();
    let page_size = memory.page_size();
    let num_pages = pages_for(size, page_size);

    // a request can name more pages than the table will ever hold
    let capacity = num_pages.min(memory.num_frames());
    let mut reservation = Reservation::new(memory, capacity);
    reservation.take_first_fit(num_pages);

    if reservation.frames.len() < num_pages {
        let found = reservation.frames.len();
        drop(reservation);
        warn!(
            "process {}: needed {} frames but only {} were free, allocation rolled back",
            id, num_pages, found
        );
        return Err(AllocationError::InsufficientFrames {
            id,
            requested: num_pages,
            available: found,
        });
    }

    let frames = reservation.commit();
    let page_table = PageTable::from_frames(frames);
    fill_contents(memory, &page_table, size, rng);

    Ok(Process::new(id, size, page_table))
}

/// Write a pseudo-random byte at every position of the process image
fn fill_contents(memory: &mut PhysicalMemory, table: &PageTable, size: usize, rng: &mut Xorshift64) {
    let page_size = memory.page_size();
    for i in 0..size {
        let page = i / page_size;
        let offset = i % page_size;
        let frame = table.entries()[page].frame_number;
        memory.write(frame, offset, rng.next_byte());
    }
    trace!("filled {} bytes across {} pages", size, table.len());
}

/// Hand a process's frames back to the free pool, zeroed.
///
/// Only used to undo a creation that could not be registered.
pub(crate) fn release(process: &Process, memory: &mut PhysicalMemory) {
    for (_, frame) in process.page_table().mappings() {
        memory.clear(frame);
        memory.mark_free(frame);
    }
}
