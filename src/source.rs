use std::cell::OnceCell;
use std::fs::File;
use std::io::{BufReader, Read};

use crate::loc::calculate_line_offsets;
use crate::parse_error::ParseResult;

/// An immutable source file. Line offsets are computed lazily since they are only needed when a
/// diagnostic or a location is materialized.
pub struct Source {
    pub file_path: String,
    pub contents: String,
    line_offsets: OnceCell<Vec<usize>>,
}

impl Source {
    pub fn new_from_file(file_path: &str) -> ParseResult<Source> {
        // Read file to string
        let file = File::open(file_path)?;
        let mut reader = BufReader::new(file);

        let mut contents = String::new();
        reader.read_to_string(&mut contents)?;

        Ok(Source::new_from_string(file_path, contents))
    }

    pub fn new_from_string(file_path: &str, contents: String) -> Source {
        Source {
            file_path: file_path.to_owned(),
            contents,
            line_offsets: OnceCell::new(),
        }
    }

    pub fn line_offsets(&self) -> &[usize] {
        self.line_offsets
            .get_or_init(|| calculate_line_offsets(&self.contents))
    }
}
