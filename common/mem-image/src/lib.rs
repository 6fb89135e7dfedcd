// Licensed under the Apache-2.0 license

//! Intel-HEX to memory image conversion.
//!
//! Every data byte of every record becomes one `@<address> <byte>` line, both
//! in lowercase hex with at least two digits:
//!
//! ```text
//! :02000000AABB..   →   @00 aa
//!                       @01 bb
//! ```
//!
//! Record types are not interpreted and checksums are not verified. Lines that
//! do not start with `:`, lines that are not valid UTF-8, and truncated or
//! non-hex records are skipped.

use log::debug;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MemImageError {
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MemImageError>;

/// A decoded Intel-HEX record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    pub address: u16,
    pub record_type: u8,
    pub data: Vec<u8>,
}

impl Record {
    /// One memory word per payload byte, at consecutive addresses.
    pub fn words(&self) -> impl Iterator<Item = MemWord> + '_ {
        self.data.iter().enumerate().map(|(i, &value)| MemWord {
            address: u32::from(self.address) + i as u32,
            value,
        })
    }
}

/// One line of the memory image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemWord {
    pub address: u32,
    pub value: u8,
}

impl fmt::Display for MemWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{:02x} {:02x}", self.address, self.value)
    }
}

/// Parse a `:LLAAAATT<data>` record line.
///
/// Returns `None` for lines that are not records or are too short for the
/// length they declare. Anything after the payload (the checksum) is ignored.
pub fn parse_record(line: &str) -> Option<Record> {
    let line = line.strip_prefix(':')?;
    let header = hex::decode(line.get(0..8)?).ok()?;
    let len = usize::from(header[0]);
    let data = hex::decode(line.get(8..8 + 2 * len)?).ok()?;
    Some(Record {
        address: u16::from_be_bytes([header[1], header[2]]),
        record_type: header[3],
        data,
    })
}

/// Convert Intel-HEX text from `input` into memory image lines on `output`.
///
/// Returns the number of bytes written.
pub fn convert<R: BufRead, W: Write>(input: R, output: &mut W) -> Result<usize> {
    let mut count = 0;
    for line in input.split(b'\n') {
        let line = line?;
        let Ok(line) = std::str::from_utf8(&line) else {
            debug!("skipping non-text line");
            continue;
        };
        let line = line.trim_end();
        let Some(record) = parse_record(line) else {
            if line.starts_with(':') {
                debug!("skipping malformed record {line:?}");
            }
            continue;
        };
        for word in record.words() {
            writeln!(output, "{word}")?;
            count += 1;
        }
    }
    Ok(count)
}

/// Convert the Intel-HEX file `input` into the memory image file `output`.
pub fn convert_file(input: &Path, output: &Path) -> Result<usize> {
    let reader = File::open(input).map_err(|source| MemImageError::Open {
        path: input.to_path_buf(),
        source,
    })?;
    let writer = File::create(output).map_err(|source| MemImageError::Open {
        path: output.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(writer);
    let count = convert(BufReader::new(reader), &mut writer)?;
    writer.flush()?;
    Ok(count)
}
