use std::path::{Path, PathBuf};

use cvsort_core::Upload;

use crate::IngestError;

/// Returns true if the filename has an accepted resume extension (PDF, DOCX or TXT).
pub fn is_supported(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.ends_with(".pdf") || lower.ends_with(".docx") || lower.ends_with(".txt")
}

/// Returns true for dotfiles and Office lock files (`~$resume.docx`).
fn is_hidden(name: &str) -> bool {
    name.starts_with('.') || name.starts_with("~$")
}

/// Expand command-line paths into the ordered list of files to process.
///
/// Files are kept as given, in argument order, whatever their extension
/// (unknown extensions are read as plain text). Directories are expanded one
/// level deep to their supported, non-hidden files, sorted by filename.
pub fn collect_inputs(paths: &[PathBuf]) -> Result<Vec<PathBuf>, IngestError> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            let mut entries = Vec::new();
            let dir = std::fs::read_dir(path).map_err(|e| IngestError::io(path, e))?;
            for entry in dir {
                let entry = entry.map_err(|e| IngestError::io(path, e))?;
                let entry_path = entry.path();
                if !entry_path.is_file() {
                    continue;
                }
                let name = entry.file_name().to_string_lossy().to_string();
                if is_hidden(&name) || !is_supported(&name) {
                    tracing::debug!(path = %entry_path.display(), "skipping unsupported file");
                    continue;
                }
                entries.push(entry_path);
            }
            entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
            tracing::debug!(dir = %path.display(), files = entries.len(), "expanded directory");
            files.extend(entries);
        } else if path.is_file() {
            files.push(path.clone());
        } else {
            return Err(IngestError::NotFound(path.clone()));
        }
    }

    Ok(files)
}

/// Display filename for a path: its final component, or the whole path.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Read each file into an [`Upload`], preserving order.
pub fn read_uploads(paths: &[PathBuf]) -> Result<Vec<Upload>, IngestError> {
    paths
        .iter()
        .map(|path| {
            let bytes = std::fs::read(path).map_err(|e| IngestError::io(path, e))?;
            Ok(Upload::new(display_name(path), bytes))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_extensions() {
        assert!(is_supported("a.pdf"));
        assert!(is_supported("A.DOCX"));
        assert!(is_supported("notes.Txt"));
        assert!(!is_supported("a.doc"));
        assert!(!is_supported("a.md"));
    }

    #[test]
    fn directory_expansion_is_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.pdf", "a.txt", "c.docx", "skip.png", ".hidden.txt", "~$lock.docx"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.pdf")).unwrap();

        let files = collect_inputs(&[dir.path().to_path_buf()]).unwrap();
        let names: Vec<String> = files.iter().map(|p| display_name(p)).collect();
        assert_eq!(names, vec!["a.txt", "b.pdf", "c.docx"]);
    }

    #[test]
    fn explicit_files_keep_argument_order() {
        let dir = tempfile::tempdir().unwrap();
        let z = dir.path().join("z.md");
        let a = dir.path().join("a.pdf");
        std::fs::write(&z, b"z").unwrap();
        std::fs::write(&a, b"a").unwrap();

        let files = collect_inputs(&[z.clone(), a.clone()]).unwrap();
        assert_eq!(files, vec![z, a]);
    }

    #[test]
    fn missing_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.pdf");
        let err = collect_inputs(&[missing.clone()]).unwrap_err();
        assert!(matches!(err, IngestError::NotFound(p) if p == missing));
    }

    #[test]
    fn read_uploads_uses_file_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Jane_Intern.txt");
        std::fs::write(&path, b"Jane Doe").unwrap();

        let uploads = read_uploads(&[path]).unwrap();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].filename, "Jane_Intern.txt");
        assert_eq!(uploads[0].bytes, b"Jane Doe");
    }
}
