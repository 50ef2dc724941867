use crate::core::models::structure::CondensedStructure;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Defines the interface for reading condensed structure files.
///
/// Implementors handle format-specific parsing; the conversion into the
/// validated model is shared (see [`super::condensed`]).
pub trait CondensedFile {
    /// The error type for read operations.
    type Error: Error + From<io::Error>;

    /// Reads a condensed structure from a reader.
    ///
    /// # Errors
    ///
    /// Returns an error if the content cannot be parsed or violates a model invariant.
    fn read_from(reader: &mut impl Read) -> Result<CondensedStructure, Self::Error>;

    /// Parses a condensed structure from an in-memory string.
    fn read_from_str(content: &str) -> Result<CondensedStructure, Self::Error> {
        Self::read_from(&mut content.as_bytes())
    }

    /// Reads a condensed structure from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<CondensedStructure, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}
