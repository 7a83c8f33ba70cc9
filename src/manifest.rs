//! Local manifest files: tab-separated, one header line, first column the
//! file id, second the file name. Consumed here; produced only by the
//! portal's manifest endpoint.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::GdcError;

/// Maps file name (column 2) to file id (column 1), skipping the header.
/// A file name that repeats keeps the id from its last occurrence.
pub fn map_file_names_to_ids(path: &Path) -> Result<HashMap<String, String>, GdcError> {
    let content = read_manifest(path)?;
    let mut name_to_id = HashMap::new();
    for (index, line) in content.lines().enumerate().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut columns = line.split('\t');
        let file_id = columns.next().unwrap_or_default();
        let file_name = columns.next().ok_or_else(|| GdcError::ManifestParse {
            line: index + 1,
            message: "expected at least two tab-separated columns".to_string(),
        })?;
        name_to_id.insert(file_name.to_string(), file_id.to_string());
    }
    Ok(name_to_id)
}

/// First column of every data line, in file order. Lines with a single
/// column are allowed; the whole line is the id.
pub fn manifest_file_ids(path: &Path) -> Result<Vec<String>, GdcError> {
    let content = read_manifest(path)?;
    Ok(content
        .lines()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            line.split('\t')
                .next()
                .unwrap_or_default()
                .trim_end()
                .to_string()
        })
        .collect())
}

fn read_manifest(path: &Path) -> Result<String, GdcError> {
    fs::read_to_string(path)
        .map_err(|err| GdcError::Filesystem(format!("read manifest {}: {err}", path.display())))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use assert_matches::assert_matches;

    use super::*;

    fn write_manifest(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn ids_skip_header_and_keep_order() {
        let file = write_manifest("id\tfilename\tmd5\nu1\ta.tsv\tx\nu2\tb.tsv\ty\n");
        let ids = manifest_file_ids(file.path()).unwrap();
        assert_eq!(ids, vec!["u1", "u2"]);
    }

    #[test]
    fn map_requires_two_columns() {
        let file = write_manifest("id\tfilename\nu1-no-name\n");
        let err = map_file_names_to_ids(file.path()).unwrap_err();
        assert_matches!(err, GdcError::ManifestParse { line: 2, .. });
    }

    #[test]
    fn missing_file_is_a_filesystem_error() {
        let err = manifest_file_ids(Path::new("does/not/exist.txt")).unwrap_err();
        assert_matches!(err, GdcError::Filesystem(_));
    }
}
