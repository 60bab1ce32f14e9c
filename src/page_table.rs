use std::fmt;

/// Caller-chosen process identifier. Uniqueness is a session policy, not a type guarantee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProcessId(pub u32);

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ProcessId {
    fn from(id: u32) -> Self {
        ProcessId(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTableEntry {
    pub frame_number: usize,
}

/// Ordered page -> frame mapping; the page index is the position in the table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageTable {
    entries: Vec<PageTableEntry>,
}

impl PageTable {
    pub(crate) fn from_frames(frames: Vec<usize>) -> Self {
        PageTable {
            entries: frames
                .into_iter()
                .map(|frame_number| PageTableEntry { frame_number })
                .collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Frame backing `page`, if the page exists
    pub fn frame_of(&self, page: usize) -> Option<usize> {
        self.entries.get(page).map(|e| e.frame_number)
    }

    pub fn entries(&self) -> &[PageTableEntry] {
        &self.entries
    }

    /// `(page, frame)` pairs in page order
    pub fn mappings(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.entries.iter().map(|e| e.frame_number).enumerate()
    }
}

/// A process and the page table it exclusively owns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    id: ProcessId,
    size: usize,
    page_table: PageTable,
}

impl Process {
    pub(crate) fn new(id: ProcessId, size: usize, page_table: PageTable) -> Self {
        Process {
            id,
            size,
            page_table,
        }
    }

    #[inline]
    pub fn id(&self) -> ProcessId {
        self.id
    }

    /// Declared size in bytes
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn num_pages(&self) -> usize {
        self.page_table.len()
    }

    pub fn page_table(&self) -> &PageTable {
        &self.page_table
    }
}

/// Number of pages needed to hold `size` bytes
#[inline]
pub fn pages_for(size: usize, page_size: usize) -> usize {
    size.div_ceil(page_size)
}
