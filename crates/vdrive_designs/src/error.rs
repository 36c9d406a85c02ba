//! Error types for design construction and memory-image handling.

use std::io;
use std::path::PathBuf;

/// Errors raised while building a design model or handling its memory images.
#[derive(Debug, thiserror::Error)]
pub enum DesignError {
    /// A memory image could not be read or written.
    #[error("cannot access {}: {source}", path.display())]
    Io {
        /// The file being accessed.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// A memory image line is not a valid hexadecimal word.
    #[error("{}:{line}: {reason}", path.display())]
    Parse {
        /// The file being parsed.
        path: PathBuf,
        /// One-based line number.
        line: usize,
        /// Why the line was rejected.
        reason: String,
    },

    /// Matrix or tile dimensions, or an image's size, are inconsistent.
    #[error("geometry mismatch: {0}")]
    Geometry(String),

    /// Stimulus settings that cannot produce operands.
    #[error("invalid stimulus: {0}")]
    Stimulus(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_display() {
        let e = DesignError::Io {
            path: PathBuf::from("input_mem.csv"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(e.to_string(), "cannot access input_mem.csv: no such file");
    }

    #[test]
    fn parse_display() {
        let e = DesignError::Parse {
            path: PathBuf::from("result_mem.csv"),
            line: 12,
            reason: "invalid digit 'g'".into(),
        };
        assert_eq!(e.to_string(), "result_mem.csv:12: invalid digit 'g'");
    }

    #[test]
    fn geometry_display() {
        let e = DesignError::Geometry("expected 64 words, found 63".into());
        assert_eq!(
            e.to_string(),
            "geometry mismatch: expected 64 words, found 63"
        );
    }

    #[test]
    fn stimulus_display() {
        let e = DesignError::Stimulus("empty value range 3..3".into());
        assert_eq!(e.to_string(), "invalid stimulus: empty value range 3..3");
    }
}
