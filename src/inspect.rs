//! Read-only views over the frame table and process page tables.

use std::io::{self, Write};

use crate::memory::PhysicalMemory;
use crate::page_table::Process;

/// Share of free frames, in percent
pub fn free_percentage(memory: &PhysicalMemory) -> f64 {
    if memory.num_frames() == 0 {
        return 0.0;
    }
    memory.free_count() as f64 / memory.num_frames() as f64 * 100.0
}

/// Bytes as two-digit uppercase hex separated by single spaces
pub fn hex_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Print every frame in index order, then the free percentage
pub fn dump_memory<W: Write>(memory: &PhysicalMemory, out: &mut W) -> io::Result<()> {
    writeln!(out, "Physical Memory:")?;
    for (index, frame) in memory.frames() {
        if frame.is_free() {
            writeln!(out, "Frame {}: Free", index)?;
        } else {
            writeln!(out, "Frame {}: {}", index, hex_bytes(frame.data()))?;
        }
    }
    writeln!(out, "Free memory: {:.2}%", free_percentage(memory))
}

pub fn dump_page_table<W: Write>(process: &Process, out: &mut W) -> io::Result<()> {
    writeln!(out, "Process {} Page Table:", process.id())?;
    writeln!(out, "Process size: {} bytes", process.size())?;
    for (page, frame) in process.page_table().mappings() {
        writeln!(out, "Page {} -> Frame {}", page, frame)?;
    }
    Ok(())
}
