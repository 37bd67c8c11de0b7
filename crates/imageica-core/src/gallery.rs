//! Browsing the images in a directory.
//!
//! A [`Gallery`] lists the files of one directory whose extension is one of
//! [`ImageFormat::LISTED_EXTENSIONS`], sorted by path, and keeps a cursor so a
//! front end can step to the next or previous image.

use std::path::{Path, PathBuf};

use crate::decode::{ImageFormat, LoadError};

/// Sorted list of image files with a cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Gallery {
    entries: Vec<PathBuf>,
    cursor: Option<usize>,
}

impl Gallery {
    /// List the image files in `dir`. Subdirectories are not descended into.
    ///
    /// # Errors
    ///
    /// [`LoadError::Io`] if the directory cannot be read.
    pub fn scan(dir: impl AsRef<Path>) -> Result<Self, LoadError> {
        let dir = dir.as_ref();
        let io_error = |e: std::io::Error| {
            tracing::error!("can't read directory {}", dir.display());
            LoadError::Io {
                path: dir.display().to_string(),
                reason: e.to_string(),
            }
        };

        let mut entries = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io_error)? {
            let path = entry.map_err(io_error)?.path();
            if path.is_file() && is_listed(&path) {
                entries.push(path);
            }
        }

        let gallery = Self::from_paths(entries);
        tracing::info!("found {} images in {}", gallery.len(), dir.display());
        Ok(gallery)
    }

    /// Build a gallery from paths, keeping only listed extensions.
    pub fn from_paths(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut entries: Vec<PathBuf> = paths.into_iter().filter(|p| is_listed(p)).collect();
        entries.sort();
        entries.dedup();
        Self {
            entries,
            cursor: None,
        }
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Path under the cursor.
    pub fn current(&self) -> Option<&Path> {
        self.cursor.map(|i| self.entries[i].as_path())
    }

    /// Move the cursor to `path`. Returns false if it is not listed.
    pub fn select(&mut self, path: impl AsRef<Path>) -> bool {
        match self.entries.iter().position(|p| p == path.as_ref()) {
            Some(index) => {
                self.cursor = Some(index);
                true
            }
            None => false,
        }
    }

    /// Advance the cursor. Returns `None` at the last entry without moving.
    ///
    /// With no selection the first entry is selected.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&Path> {
        let index = match self.cursor {
            None if !self.entries.is_empty() => 0,
            Some(i) if i + 1 < self.entries.len() => i + 1,
            _ => return None,
        };
        self.cursor = Some(index);
        Some(self.entries[index].as_path())
    }

    /// Step the cursor back. Returns `None` at the first entry without moving.
    ///
    /// With no selection the last entry is selected.
    pub fn previous(&mut self) -> Option<&Path> {
        let index = match self.cursor {
            None if !self.entries.is_empty() => self.entries.len() - 1,
            Some(i) if i > 0 => i - 1,
            _ => return None,
        };
        self.cursor = Some(index);
        Some(self.entries[index].as_path())
    }
}

fn is_listed(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            ImageFormat::LISTED_EXTENSIONS
                .iter()
                .any(|listed| listed.eq_ignore_ascii_case(ext))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(|n| PathBuf::from("/photos").join(n)).collect()
    }

    #[test]
    fn test_filters_and_sorts() {
        let g = Gallery::from_paths(paths(&["b.png", "notes.txt", "a.JPG", "c.ima", "d.jpeg"]));
        let names: Vec<_> = g
            .entries()
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.JPG", "b.png", "c.ima"]);
    }

    #[test]
    fn test_next_stops_at_end() {
        let mut g = Gallery::from_paths(paths(&["a.png", "b.png"]));
        assert!(g.current().is_none());
        assert_eq!(g.next(), Some(Path::new("/photos/a.png")));
        assert_eq!(g.next(), Some(Path::new("/photos/b.png")));
        assert_eq!(g.next(), None);
        assert_eq!(g.current(), Some(Path::new("/photos/b.png")));
    }

    #[test]
    fn test_previous_stops_at_start() {
        let mut g = Gallery::from_paths(paths(&["a.png", "b.png", "c.png"]));
        assert!(g.select("/photos/b.png"));
        assert_eq!(g.previous(), Some(Path::new("/photos/a.png")));
        assert_eq!(g.previous(), None);
        assert_eq!(g.current(), Some(Path::new("/photos/a.png")));
    }

    #[test]
    fn test_previous_without_selection_starts_at_end() {
        let mut g = Gallery::from_paths(paths(&["a.png", "b.png"]));
        assert_eq!(g.previous(), Some(Path::new("/photos/b.png")));
    }

    #[test]
    fn test_select_unknown_path() {
        let mut g = Gallery::from_paths(paths(&["a.png"]));
        assert!(!g.select("/photos/z.png"));
        assert!(g.current().is_none());
    }

    #[test]
    fn test_empty_gallery() {
        let mut g = Gallery::default();
        assert!(g.is_empty());
        assert_eq!(g.next(), None);
        assert_eq!(g.previous(), None);
    }

    #[test]
    fn test_scan_directory() {
        let dir = std::env::temp_dir().join(format!("imageica-gallery-{}", std::process::id()));
        std::fs::create_dir_all(dir.join("nested.png")).unwrap();
        for name in ["b.png", "a.jpg", "readme.md"] {
            std::fs::write(dir.join(name), b"x").unwrap();
        }

        let g = Gallery::scan(&dir).unwrap();
        std::fs::remove_dir_all(&dir).ok();

        assert_eq!(g.entries(), &[dir.join("a.jpg"), dir.join("b.png")]);
    }

    #[test]
    fn test_scan_missing_directory() {
        let dir = std::env::temp_dir().join(format!("imageica-gallery-missing-{}", std::process::id()));
        assert!(matches!(Gallery::scan(&dir), Err(LoadError::Io { .. })));
    }
}
