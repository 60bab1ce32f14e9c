use std::collections::HashSet;
use std::io::Cursor;

use paging_sim::io::{Prompter, run_menu};
use paging_sim::{AllocationError, Error, LookupError, ProcessId, Session, SimConfig};

fn session(memory: usize, page: usize, max: usize) -> Session {
    Session::new(SimConfig::new(memory, page, max).with_seed(11)).unwrap()
}

fn frames_of(session: &Session, id: u32) -> Vec<usize> {
    session
        .lookup(ProcessId(id))
        .unwrap()
        .page_table()
        .mappings()
        .map(|(_, frame)| frame)
        .collect()
}

fn transcript(session: &mut Session, input: &str) -> String {
    let mut prompter = Prompter::new(Cursor::new(input.to_string()), Vec::new());
    run_menu(session, &mut prompter).unwrap();
    String::from_utf8(prompter.into_output()).unwrap()
}

#[test]
fn test_first_fit_determinism() {
    let mut s = session(50, 10, 100);
    s.create_process(ProcessId(1), 25).unwrap();
    assert_eq!(frames_of(&s, 1), vec![0, 1, 2]);
}

#[test]
fn test_insufficient_frames_rollback() {
    let mut s = session(20, 10, 100);
    let err = s.create_process(ProcessId(1), 50).unwrap_err();
    assert!(matches!(
        err,
        Error::Allocation(AllocationError::InsufficientFrames { requested: 5, .. })
    ));
    assert!(s.memory().is_free(0));
    assert!(s.memory().is_free(1));
    assert!(s.registry().is_empty());
}

#[test]
fn test_rounding_law() {
    let mut s = session(100, 10, 100);
    assert_eq!(s.create_process(ProcessId(1), 21).unwrap().num_pages(), 3);
    assert_eq!(s.create_process(ProcessId(2), 10).unwrap().num_pages(), 1);
}

#[test]
fn test_lookup_tie_break() {
    let mut s = Session::new(
        SimConfig::new(100, 10, 100)
            .with_duplicate_ids(true)
            .with_seed(1),
    )
    .unwrap();
    s.create_process(ProcessId(4), 30).unwrap();
    s.create_process(ProcessId(4), 10).unwrap();

    let found = s.lookup(ProcessId(4)).unwrap();
    assert_eq!(found.size(), 30);
    assert_eq!(frames_of(&s, 4), vec![0, 1, 2]);
}

#[test]
fn test_percentage_report() {
    let mut s = session(40, 10, 100);
    s.create_process(ProcessId(1), 10).unwrap();

    let mut out = Vec::new();
    s.dump_memory(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.ends_with("Free memory: 75.00%\n"));
    assert!(text.contains("Frame 1: Free"));
}

#[test]
fn test_inspection_is_idempotent() {
    let mut s = session(60, 10, 100);
    s.create_process(ProcessId(1), 15).unwrap();
    s.create_process(ProcessId(2), 22).unwrap();
    let memory = s.memory().clone();
    let registry = s.registry().clone();

    let mut out = Vec::new();
    s.dump_memory(&mut out).unwrap();
    s.dump_page_table(ProcessId(2), &mut out).unwrap();
    s.dump_memory(&mut out).unwrap();

    assert_eq!(s.memory(), &memory);
    assert_eq!(s.registry(), &registry);
}

#[test]
fn test_frames_are_exclusive_across_processes() {
    let mut s = session(100, 10, 100);
    for (id, size) in [(1, 15), (2, 30), (3, 5), (4, 20)] {
        s.create_process(ProcessId(id), size).unwrap();
    }

    let mut seen = HashSet::new();
    for process in s.registry().iter() {
        for (_, frame) in process.page_table().mappings() {
            assert!(seen.insert(frame), "frame {frame} mapped twice");
            assert!(!s.memory().is_free(frame));
        }
    }
    assert_eq!(s.memory().free_count() + s.registry().total_pages(), s.memory().num_frames());
}

#[test]
fn test_lookup_missing() {
    let s = session(50, 10, 50);
    assert_eq!(s.lookup(ProcessId(2)).unwrap_err(), LookupError::NotFound(ProcessId(2)));
}

#[test]
fn test_menu_transcript() {
    let mut s = session(40, 10, 30);
    let out = transcript(&mut s, "2\n7\n25\n3\n7\n1\n4\n");

    assert!(out.contains("Process 7 created with 3 pages."));
    assert!(out.contains(
        "Process 7 Page Table:\nProcess size: 25 bytes\nPage 0 -> Frame 0\nPage 1 -> Frame 1\nPage 2 -> Frame 2\n"
    ));
    assert!(out.contains("Frame 3: Free"));
    assert!(out.contains("Free memory: 25.00%"));
    assert_eq!(s.registry().len(), 1);
}

#[test]
fn test_menu_survives_errors() {
    let mut s = session(20, 10, 100);
    let out = transcript(&mut s, "9\n2\n1\n50\n3\n5\n2\n2\n10\n");

    assert!(out.contains("Unknown option: 9"));
    assert!(out.contains("Error: not enough memory to allocate process 1"));
    assert!(out.contains("Process not found."));
    // input ran out without choosing exit; the process created last still stands
    assert!(out.contains("Process 2 created with 1 pages."));
    assert_eq!(s.memory().free_count(), 1);
}

#[test]
fn test_menu_rejects_oversized_process() {
    let mut s = session(100, 10, 30);
    let out = transcript(&mut s, "2\n1\n31\n4\n");
    assert!(out.contains("Error: process size 31 exceeds the maximum allowed size of 30 bytes"));
    assert!(s.registry().is_empty());
}

#[test]
fn test_same_seed_same_contents() {
    let mut a = session(40, 10, 40);
    let mut b = session(40, 10, 40);
    a.create_process(ProcessId(1), 33).unwrap();
    b.create_process(ProcessId(1), 33).unwrap();
    assert_eq!(a.memory(), b.memory());
}

#[test]
fn test_huge_request_fails_without_panicking() {
    let mut s = Session::new(SimConfig::new(10, 1, usize::MAX).with_seed(1)).unwrap();
    let err = s.create_process(ProcessId(1), usize::MAX / 4).unwrap_err();
    assert!(matches!(
        err,
        Error::Allocation(AllocationError::InsufficientFrames { available: 10, .. })
    ));
    assert_eq!(s.memory().free_count(), 10);
    assert!(s.registry().is_empty());

    // the session is still usable afterwards
    s.create_process(ProcessId(2), 4).unwrap();
    assert_eq!(frames_of(&s, 2), vec![0, 1, 2, 3]);
}
