use anyhow::{Context, Result, bail};
use keyword_core::{Document, config::PROJECT_FILE_EXTENSION};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Write `document` to `path`, refusing if the file changed since it was
/// read (its contents no longer hash to `fingerprint`).
pub fn write_back(document: &Document, path: &Path, fingerprint: &str) -> Result<()> {
    let on_disk = Document::load_from_file(path)
        .with_context(|| format!("Failed to re-read {}", path.display()))?;
    if on_disk.fingerprint() != fingerprint {
        bail!("{} changed on disk, not overwriting it", path.display());
    }

    document
        .save_to_file(path)
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Files under `root` to harvest, skipping hidden directories and project files.
///
/// An empty `extensions` list accepts every file.
pub fn collect_files(root: &Path, extensions: &[String]) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry.file_name()))
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            let ext = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");
            ext != PROJECT_FILE_EXTENSION
                && (extensions.is_empty() || extensions.iter().any(|wanted| wanted == ext))
        })
        .collect();
    files.sort();
    files
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_str().is_some_and(|name| name.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_collect_files_filters() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("pkg")).unwrap();
        fs::create_dir_all(temp.path().join(".git")).unwrap();
        fs::write(temp.path().join("a.py"), "").unwrap();
        fs::write(temp.path().join("pkg/b.py"), "").unwrap();
        fs::write(temp.path().join("pkg/c.txt"), "").unwrap();
        fs::write(temp.path().join(".git/d.py"), "").unwrap();
        fs::write(temp.path().join("app.keyword-project"), "{}").unwrap();

        let names = |files: Vec<PathBuf>| -> Vec<String> {
            files
                .iter()
                .map(|f| f.strip_prefix(temp.path()).unwrap().display().to_string())
                .collect()
        };

        assert_eq!(
            names(collect_files(temp.path(), &["py".to_string()])),
            ["a.py", "pkg/b.py"]
        );
        assert_eq!(
            names(collect_files(temp.path(), &[])),
            ["a.py", "pkg/b.py", "pkg/c.txt"]
        );
    }

    #[test]
    fn test_write_back_detects_changes() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("doc.txt");
        fs::write(&path, "one\n").unwrap();

        let mut document = Document::load_from_file(&path).unwrap();
        let fingerprint = document.fingerprint();
        document.insert(4, "two\n").unwrap();

        fs::write(&path, "changed\n").unwrap();
        assert!(write_back(&document, &path, &fingerprint).is_err());

        fs::write(&path, "one\n").unwrap();
        write_back(&document, &path, &fingerprint).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }
}
