// crates/engine/src/source.rs
use crate::error::{EngineError, Result};
use crate::options::InputSource;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use wordfreq_core::CoreError;

const IN_BUFFER_SIZE: usize = 128 * 1024;

/// Reads all of `reader`, refusing anything larger than `max` bytes.
/// `origin` names the input in error messages.
///
/// # Errors
///
/// - [`CoreError::InputTooLarge`] when the input has more than `max` bytes.
/// - [`EngineError::InputRead`] when reading fails.
pub fn read_input<R: Read>(reader: R, max: usize, origin: &Path) -> Result<Vec<u8>> {
    let limit = u64::try_from(max).unwrap_or(u64::MAX).saturating_add(1);
    let mut bytes = Vec::new();
    reader
        .take(limit)
        .read_to_end(&mut bytes)
        .map_err(|e| EngineError::InputRead {
            path: origin.to_path_buf(),
            source: e,
        })?;
    if bytes.len() > max {
        return Err(CoreError::InputTooLarge {
            size: bytes.len(),
            max,
        }
        .into());
    }
    Ok(bytes)
}

/// Opens `source` and reads it whole.
///
/// # Errors
///
/// See [`read_input`]; opening a missing file is an [`EngineError::InputRead`].
pub fn load(source: &InputSource, max: usize) -> Result<Vec<u8>> {
    let origin = source.display_path();
    let bytes = match source {
        InputSource::Stdin => read_input(io::stdin().lock(), max, &origin)?,
        InputSource::Path(path) => {
            let file = File::open(path).map_err(|e| EngineError::InputRead {
                path: path.clone(),
                source: e,
            })?;
            read_input(BufReader::with_capacity(IN_BUFFER_SIZE, file), max, &origin)?
        }
    };
    log::info!("input size = {} bytes ({source})", bytes.len());
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn reads_up_to_the_limit() {
        let bytes = read_input(&b"exactly10!"[..], 10, Path::new("mem")).unwrap();
        assert_eq!(bytes, b"exactly10!");
    }

    #[test]
    fn refuses_oversized_input() {
        let err = read_input(&b"eleven bytes"[..], 11, Path::new("mem")).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Core(CoreError::InputTooLarge { size: 12, max: 11 })
        ));
    }

    #[test]
    fn loads_files_and_reports_missing_ones() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "Some words").unwrap();
        let source = InputSource::Path(file.path().to_path_buf());
        assert_eq!(load(&source, 1024).unwrap(), b"Some words");

        let missing = InputSource::Path("/nonexistent/wordfreq/input.txt".into());
        assert!(matches!(
            load(&missing, 1024),
            Err(EngineError::InputRead { .. })
        ));
    }
}
