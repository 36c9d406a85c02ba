//! Hex memory images, one 64-bit word per line.
//!
//! This is the `$readmemh` / `$writememh` subset the testbench uses: each
//! non-blank line holds up to sixteen hex digits. Surrounding whitespace is
//! ignored.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::error::DesignError;

/// Reads every word of a memory image.
pub fn read_words(path: &Path) -> Result<Vec<u64>, DesignError> {
    let content = fs::read_to_string(path).map_err(|source| DesignError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_words(&content, path)
}

/// Parses memory-image text. `origin` is only used in error messages.
pub fn parse_words(content: &str, origin: &Path) -> Result<Vec<u64>, DesignError> {
    content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(line_no, line)| {
            u64::from_str_radix(line, 16).map_err(|e| DesignError::Parse {
                path: origin.to_path_buf(),
                line: line_no,
                reason: format!("'{line}' is not a 64-bit hex word ({e})"),
            })
        })
        .collect()
}

/// Formats words as memory-image text: sixteen lowercase hex digits per line.
pub fn format_words(words: &[u64]) -> String {
    let mut out = String::with_capacity(words.len() * 17);
    for word in words {
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{word:016x}");
    }
    out
}

/// Writes a memory image, replacing any existing file.
pub fn write_words(path: &Path, words: &[u64]) -> Result<(), DesignError> {
    fs::write(path, format_words(words)).map_err(|source| DesignError::Io {
        path: path.to_path_buf(),
        source,
    })
}
