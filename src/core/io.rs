//! Input opening and line iteration
//!
//! VCF text may come from stdin or a file, plain or compressed. The
//! compression format is sniffed from the first bytes so piped bgzip
//! output works the same as a `.vcf.gz` path.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

/// Default buffer size for BufReader (128KB)
pub const DEFAULT_BUFFER_SIZE: usize = 128 * 1024;

/// Compression format of an input stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionFormat {
    /// Plain text (uncompressed)
    Plain,
    /// Gzip or BGZF
    Gzip,
    /// Bzip2
    Bzip2,
}

/// Detect compression from leading magic bytes
///
/// - gzip/BGZF: 1f 8b
/// - bzip2: "BZh" (42 5a 68)
pub fn detect_compression(magic: &[u8]) -> CompressionFormat {
    if magic.len() >= 2 && magic[0] == 0x1f && magic[1] == 0x8b {
        CompressionFormat::Gzip
    } else if magic.len() >= 3 && magic[0] == 0x42 && magic[1] == 0x5a && magic[2] == 0x68 {
        CompressionFormat::Bzip2
    } else {
        CompressionFormat::Plain
    }
}

/// Wrap a reader in the decoder matching its first bytes
pub fn open_reader<R: Read + 'static>(inner: R) -> io::Result<Box<dyn BufRead>> {
    let mut buffered = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, inner);
    let format = {
        let head = buffered.fill_buf()?;
        detect_compression(&head[..head.len().min(3)])
    };

    Ok(match format {
        CompressionFormat::Gzip => {
            // BGZF is a series of gzip members
            let decoder = flate2::bufread::MultiGzDecoder::new(buffered);
            Box::new(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, decoder))
        }
        CompressionFormat::Bzip2 => {
            let decoder = bzip2::bufread::BzDecoder::new(buffered);
            Box::new(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, decoder))
        }
        CompressionFormat::Plain => Box::new(buffered),
    })
}

/// Open `path`, or stdin when `path` is `None` or `-`
pub fn open_input(path: Option<&Path>) -> io::Result<Box<dyn BufRead>> {
    match path {
        Some(p) if p != Path::new("-") => open_reader(File::open(p)?),
        _ => open_reader(io::stdin()),
    }
}

/// Line reader that reuses a single buffer.
///
/// `advance` loads the next line (without its line terminator) and
/// `line` exposes it until the next call.
pub struct LineReader<R: BufRead> {
    reader: R,
    buffer: String,
    line_number: usize,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: String::with_capacity(1024),
            line_number: 0,
        }
    }

    /// Read the next line; `Ok(false)` at EOF
    pub fn advance(&mut self) -> io::Result<bool> {
        self.buffer.clear();
        if self.reader.read_line(&mut self.buffer)? == 0 {
            return Ok(false);
        }
        self.line_number += 1;
        if self.buffer.ends_with('\n') {
            self.buffer.pop();
            if self.buffer.ends_with('\r') {
                self.buffer.pop();
            }
        }
        Ok(true)
    }

    /// Current line
    pub fn line(&self) -> &str {
        &self.buffer
    }

    /// 1-based number of the current line
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}
