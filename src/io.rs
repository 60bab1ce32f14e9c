//! Interactive front end: prompts, the menu loop, and nothing else.
//!
//! All state changes go through [`Session`]; this module only reads answers
//! and prints results.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use crate::error::{Error, LookupError};
use crate::page_table::ProcessId;
use crate::session::Session;

/// Outcome of one prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer<T> {
    Value(T),
    /// The line did not parse; carries the offending text
    Invalid(String),
    /// Input stream is exhausted
    Eof,
}

pub struct Prompter<R, W> {
    input: R,
    output: W,
    line: String,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter {
            input,
            output,
            line: String::new(),
        }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print `label` and read one trimmed line; `None` at end of input
    pub fn read_line(&mut self, label: &str) -> io::Result<Option<&str>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;
        self.line.clear();
        if self.input.read_line(&mut self.line)? == 0 {
            return Ok(None);
        }
        Ok(Some(self.line.trim()))
    }

    pub fn ask<T: FromStr>(&mut self, label: &str) -> io::Result<Answer<T>> {
        Ok(match self.read_line(label)? {
            None => Answer::Eof,
            Some(text) => match text.parse() {
                Ok(value) => Answer::Value(value),
                Err(_) => Answer::Invalid(text.to_string()),
            },
        })
    }

    /// Keep asking until a positive integer is given
    pub fn ask_positive(&mut self, label: &str) -> io::Result<usize> {
        loop {
            match self.ask::<usize>(label)? {
                Answer::Value(n) if n > 0 => return Ok(n),
                Answer::Value(_) => writeln!(self.output, "Value must be greater than zero.")?,
                Answer::Invalid(text) => writeln!(self.output, "Invalid number: {}", text)?,
                Answer::Eof => {
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "input ended before startup parameters were given",
                    ));
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ViewMemory,
    CreateProcess,
    ViewPageTable,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(MenuChoice::ViewMemory),
            "2" => Ok(MenuChoice::CreateProcess),
            "3" => Ok(MenuChoice::ViewPageTable),
            "4" => Ok(MenuChoice::Exit),
            _ => Err(()),
        }
    }
}

const MENU: &str = "\n1. View memory\n2. Create process\n3. View page table\n4. Exit\n";

/// Run the menu until the user exits or input ends.
///
/// Only I/O failures on the streams are returned; every simulator error is
/// printed and the loop continues.
pub fn run_menu<R: BufRead, W: Write>(session: &mut Session, prompter: &mut Prompter<R, W>) -> io::Result<()> {
    loop {
        write!(prompter.output(), "{}", MENU)?;
        let choice = match prompter.ask::<MenuChoice>("Choice: ")? {
            Answer::Value(choice) => choice,
            Answer::Invalid(text) => {
                writeln!(prompter.output(), "\nUnknown option: {}", text)?;
                continue;
            }
            Answer::Eof => return Ok(()),
        };
        writeln!(prompter.output())?;

        match choice {
            MenuChoice::ViewMemory => {
                if let Err(err) = session.dump_memory(prompter.output()) {
                    report(prompter.output(), err)?;
                }
            }
            MenuChoice::CreateProcess => {
                let Some(id) = ask_process_id(prompter)? else {
                    return Ok(());
                };
                let size = match prompter.ask::<usize>("Process size: ")? {
                    Answer::Value(size) => size,
                    Answer::Invalid(text) => {
                        writeln!(prompter.output(), "Invalid size: {}", text)?;
                        continue;
                    }
                    Answer::Eof => return Ok(()),
                };
                match session.create_process(id, size) {
                    Ok(process) => writeln!(
                        prompter.output(),
                        "Process {} created with {} pages.",
                        process.id(),
                        process.num_pages()
                    )?,
                    Err(err) => report(prompter.output(), err)?,
                }
            }
            MenuChoice::ViewPageTable => {
                let Some(id) = ask_process_id(prompter)? else {
                    return Ok(());
                };
                writeln!(prompter.output())?;
                if let Err(err) = session.dump_page_table(id, prompter.output()) {
                    report(prompter.output(), err)?;
                }
            }
            MenuChoice::Exit => return Ok(()),
        }
    }
}

/// Re-asks on unparseable input; `Ok(None)` at end of input
fn ask_process_id<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> io::Result<Option<ProcessId>> {
    loop {
        match prompter.ask::<u32>("Process ID: ")? {
            Answer::Value(id) => return Ok(Some(ProcessId(id))),
            Answer::Invalid(text) => writeln!(prompter.output(), "Invalid process id: {}", text)?,
            Answer::Eof => return Ok(None),
        }
    }
}

fn report<W: Write>(out: &mut W, err: Error) -> io::Result<()> {
    match err {
        Error::Io(e) => Err(e),
        Error::Lookup(LookupError::NotFound(_)) => writeln!(out, "Process not found."),
        other => writeln!(out, "Error: {}", other),
    }
}
