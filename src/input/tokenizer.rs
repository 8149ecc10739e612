use crate::types::Record;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::{debug, trace};

/// Splits a line-oriented stream into whitespace-delimited [`Record`]s.
///
/// Lines with fewer than two fields are skipped, but still counted, so
/// record line numbers always match the source. Input is read as raw bytes;
/// fields that are not valid UTF-8 are converted lossily instead of failing.
pub struct Tokenizer<R> {
    reader: R,
    buf: Vec<u8>,
    line: usize,
}

impl<R: BufRead> Tokenizer<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line: 0,
        }
    }
}

impl Tokenizer<BufReader<File>> {
    /// Open `path` and tokenize its contents.
    pub fn from_path<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        debug!("Reading family records from: {:?}", path);
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

fn split_fields(bytes: &[u8]) -> Vec<String> {
    bytes
        .split(u8::is_ascii_whitespace)
        .filter(|field| !field.is_empty())
        .map(|field| String::from_utf8_lossy(field).into_owned())
        .collect()
}

impl<R: BufRead> Iterator for Tokenizer<R> {
    type Item = io::Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e)),
            }
            self.line += 1;

            let fields = split_fields(&self.buf);
            if fields.len() < 2 {
                trace!(line = self.line, "Skipping line with {} field(s)", fields.len());
                continue;
            }
            return Some(Ok(Record::new(self.line, fields)));
        }
    }
}
