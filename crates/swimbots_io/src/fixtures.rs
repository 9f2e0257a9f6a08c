//! Conformance fixture discovery.
//!
//! A fixture set is a pair of directories, `input/` and `output/`, whose files
//! are matched up by sorted file name order.

use crate::error::{IoError, Result};
use std::path::{Path, PathBuf};

/// Regular files in `dir`, sorted by file name.
///
/// An empty or missing directory is an error.
pub fn read_fixture_dir<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let entries = std::fs::read_dir(dir).map_err(|e| {
        IoError::FileSystem(e).with_context(format!("reading fixture dir {}", dir.display()))
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    if files.is_empty() {
        return Err(IoError::fixture(format!(
            "no fixture files in {}",
            dir.display()
        )));
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Input files zipped with their expected outputs.
pub fn paired_fixtures<P: AsRef<Path>, Q: AsRef<Path>>(
    input_dir: P,
    output_dir: Q,
) -> Result<Vec<(PathBuf, PathBuf)>> {
    let inputs = read_fixture_dir(input_dir)?;
    let outputs = read_fixture_dir(output_dir)?;
    if inputs.len() != outputs.len() {
        return Err(IoError::fixture(format!(
            "{} input files but {} output files",
            inputs.len(),
            outputs.len()
        )));
    }
    tracing::debug!(count = inputs.len(), "Loaded fixture pairs");
    Ok(inputs.into_iter().zip(outputs).collect())
}

/// Fixture contents with line endings normalised to `\n`.
pub fn read_fixture<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| {
        IoError::FileSystem(e).with_context(format!("reading fixture {}", path.display()))
    })?;
    Ok(text.replace("\r\n", "\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "swimbots_fixtures_{}_{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_files_sorted_by_name() {
        let dir = scratch_dir("sorted");
        for name in ["b.txt", "a.txt", "c.txt"] {
            fs::write(dir.join(name), name).unwrap();
        }
        fs::create_dir(dir.join("nested")).unwrap();

        let files = read_fixture_dir(&dir).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "c.txt"]);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_empty_dir_is_error() {
        let dir = scratch_dir("empty");
        assert!(matches!(read_fixture_dir(&dir), Err(IoError::Fixture(_))));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_mismatched_counts_are_error() {
        let input = scratch_dir("mismatch_in");
        let output = scratch_dir("mismatch_out");
        fs::write(input.join("1.txt"), "x").unwrap();
        fs::write(input.join("2.txt"), "y").unwrap();
        fs::write(output.join("1.txt"), "x").unwrap();

        assert!(matches!(
            paired_fixtures(&input, &output),
            Err(IoError::Fixture(_))
        ));
        let _ = fs::remove_dir_all(&input);
        let _ = fs::remove_dir_all(&output);
    }

    #[test]
    fn test_read_fixture_normalises_line_endings() {
        let dir = scratch_dir("crlf");
        let path = dir.join("f.txt");
        fs::write(&path, "a\r\nb\r\n").unwrap();
        assert_eq!(read_fixture(&path).unwrap(), "a\nb\n");
        let _ = fs::remove_dir_all(&dir);
    }
}
