//! Reads a numeric data matrix from text.
//!
//! One row per line, components separated by commas and/or whitespace.
//! Blank lines and lines starting with `#` are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::types::{Art2aError, Art2aResult, Component};

/// Reader for text matrix files.
pub struct MatrixReader;

impl MatrixReader {
    /// Read a matrix from a file.
    pub fn read_from_file<T: Component>(path: &Path) -> Art2aResult<Vec<Vec<T>>> {
        let file = File::open(path)?;
        Self::read_from(BufReader::new(file))
    }

    /// Read a matrix from any buffered reader.
    pub fn read_from<T: Component>(reader: impl BufRead) -> Art2aResult<Vec<Vec<T>>> {
        let mut rows = Vec::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            rows.push(parse_row(trimmed, i + 1)?);
        }
        Ok(rows)
    }
}

fn parse_row<T: Component>(line: &str, line_number: usize) -> Art2aResult<Vec<T>> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<f64>()
                .map(T::from_f64)
                .map_err(|e| Art2aError::Parse {
                    line: line_number,
                    message: format!("invalid number {:?}: {}", token, e),
                })
        })
        .collect()
}
