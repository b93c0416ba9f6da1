//! Archive search path.
//!
//! `Option "searchpath" "archive" [...]` replaces the path used to resolve
//! `ReadArchive` names; an `&` entry stands for the previous value.

use std::path::{Path, PathBuf};

/// Ordered list of directories to resolve archive names against.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    /// Parse a `:`/`;` separated directory list.
    pub fn parse(path: &str) -> Self {
        Self::default().expand(path)
    }

    /// Search path produced by a new path string, with `&` replaced by
    /// the entries of `self`.
    pub fn expand(&self, new_path: &str) -> Self {
        let mut dirs = Vec::new();
        for entry in split_path_list(new_path) {
            if entry == "&" {
                dirs.extend(self.dirs.iter().cloned());
            } else {
                dirs.push(PathBuf::from(entry));
            }
        }
        Self { dirs }
    }

    /// Directories in search order.
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// True if no directories are set.
    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    /// Resolve a file name to an existing file.
    ///
    /// Absolute names are checked as-is. Relative names are tried against
    /// each directory in order, or the working directory if none are set.
    pub fn find(&self, name: &str) -> Option<PathBuf> {
        if name.is_empty() {
            return None;
        }
        let file = Path::new(name);
        if file.is_absolute() || self.dirs.is_empty() {
            return file.is_file().then(|| file.to_path_buf());
        }
        self.dirs
            .iter()
            .map(|dir| dir.join(file))
            .find(|candidate| candidate.is_file())
    }
}

/// Split on `:` and `;`, keeping a drive letter such as `C:` attached.
fn split_path_list(path: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut start = 0;
    let bytes = path.as_bytes();
    for (i, &c) in bytes.iter().enumerate() {
        let is_drive = c == b':'
            && i == start + 1
            && bytes[start].is_ascii_alphabetic()
            && matches!(bytes.get(i + 1), Some(b'/') | Some(b'\\'));
        if (c == b':' || c == b';') && !is_drive {
            entries.push(&path[start..i]);
            start = i + 1;
        }
    }
    entries.push(&path[start..]);
    entries.into_iter().filter(|e| !e.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_split() {
        assert_eq!(split_path_list("/a:/b;c"), vec!["/a", "/b", "c"]);
        assert_eq!(split_path_list("C:/ribs;D:\\more"), vec!["C:/ribs", "D:\\more"]);
        assert_eq!(split_path_list("::/a:"), vec!["/a"]);
        assert!(split_path_list("").is_empty());
    }

    #[test]
    fn test_ampersand_expands_previous() {
        let old = SearchPath::parse("/old1:/old2");
        let new = old.expand("/first:&:/last");
        let dirs: Vec<_> = new.dirs().iter().map(|p| p.to_str().unwrap()).collect();
        assert_eq!(dirs, vec!["/first", "/old1", "/old2", "/last"]);

        let replaced = old.expand("/only");
        assert_eq!(replaced.dirs(), &[PathBuf::from("/only")]);
    }

    #[test]
    fn test_find_in_order() -> std::io::Result<()> {
        let a = TempDir::new()?;
        let b = TempDir::new()?;
        fs::write(b.path().join("scene.rib"), "WorldBegin\n")?;
        fs::write(a.path().join("other.rib"), "")?;
        fs::write(b.path().join("other.rib"), "")?;

        let path = SearchPath::default()
            .expand(&format!("{};{}", a.path().display(), b.path().display()));
        assert_eq!(path.find("scene.rib"), Some(b.path().join("scene.rib")));
        assert_eq!(path.find("other.rib"), Some(a.path().join("other.rib")));
        assert_eq!(path.find("missing.rib"), None);
        assert_eq!(path.find(""), None);
        Ok(())
    }

    #[test]
    fn test_find_absolute() -> std::io::Result<()> {
        let dir = TempDir::new()?;
        let file = dir.path().join("abs.rib");
        fs::write(&file, "")?;
        let path = SearchPath::parse("/nonexistent");
        assert_eq!(path.find(file.to_str().unwrap()), Some(file.clone()));
        assert_eq!(path.find(dir.path().join("nope.rib").to_str().unwrap()), None);
        Ok(())
    }
}
