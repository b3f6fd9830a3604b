//! Line-oriented operator console.
//!
//! # Responsibility
//! - Print prompts and read typed answers from any `BufRead`.
//! - Re-prompt until numeric and yes/no answers parse.
//!
//! # Invariants
//! - End of input surfaces as `io::ErrorKind::UnexpectedEof`, never a loop.

use std::io::{self, BufRead, Write};

const INVALID_NUMBER: &str = "Invalid number, please try again";
const INVALID_YES_NO: &str = "Please answer y or n";

pub struct Console<R, W, E> {
    reader: R,
    out: W,
    err: E,
}

impl<R: BufRead, W: Write, E: Write> Console<R, W, E> {
    pub fn new(reader: R, out: W, err: E) -> Self {
        Self { reader, out, err }
    }

    pub fn into_output(self) -> (W, E) {
        (self.out, self.err)
    }

    pub fn print(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")
    }

    /// Writes to the error stream.
    pub fn report(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.err, "{text}")?;
        self.err.flush()
    }

    /// Prints `prompt` and returns the next line without its line ending.
    pub fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(line)
    }

    pub fn read_i64(&mut self, prompt: &str) -> io::Result<i64> {
        self.read_parsed(prompt)
    }

    pub fn read_i32(&mut self, prompt: &str) -> io::Result<i32> {
        self.read_parsed(prompt)
    }

    /// Accepts `y`, `yes`, `n`, `no` in any case.
    pub fn read_yes_no(&mut self, prompt: &str) -> io::Result<bool> {
        loop {
            let answer = self.read_line(prompt)?;
            match answer.trim().to_ascii_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.print(INVALID_YES_NO)?,
            }
        }
    }

    fn read_parsed<T: std::str::FromStr>(&mut self, prompt: &str) -> io::Result<T> {
        loop {
            let answer = self.read_line(prompt)?;
            match answer.trim().parse::<T>() {
                Ok(value) => return Ok(value),
                Err(_) => self.print(INVALID_NUMBER)?,
            }
        }
    }
}
