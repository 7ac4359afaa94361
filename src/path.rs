//! Path classification utilities for xmlcfg
//!
//! `PathProps` turns a raw command-line string into a descriptor that knows
//! whether the path exists, what kind of filesystem object it names, its
//! size, and its absolute form. Classification follows symbolic links.

use std::fs;
use std::path::{Component, Path, PathBuf};

/// A command-line path argument and what it refers to on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathProps {
    arg: String,
    abs: PathBuf,
    exists: bool,
    is_file: bool,
    is_dir: bool,
    size: u64,
}

impl PathProps {
    /// Classify `arg`, resolving relative paths against `base`
    ///
    /// An empty argument describes nothing: it never exists and has an empty
    /// absolute path.
    pub fn new_in(arg: &str, base: &Path) -> Self {
        if arg.is_empty() {
            return Self {
                arg: String::new(),
                abs: PathBuf::new(),
                exists: false,
                is_file: false,
                is_dir: false,
                size: 0,
            };
        }

        let abs = normalize(&base.join(arg));
        let (exists, is_file, is_dir, size) = match fs::metadata(&abs) {
            Ok(meta) => (true, meta.is_file(), meta.is_dir(), meta.len()),
            Err(_) => (false, false, false, 0),
        };

        Self {
            arg: arg.to_string(),
            abs,
            exists,
            is_file,
            is_dir,
            size,
        }
    }

    /// The argument as given on the command line
    pub fn arg(&self) -> &str {
        &self.arg
    }

    /// Absolute, lexically normalized form of the argument
    pub fn abs_path(&self) -> &Path {
        &self.abs
    }

    pub fn exists(&self) -> bool {
        self.exists
    }

    /// Exists and is a regular file
    pub fn is_okay_file(&self) -> bool {
        self.exists && self.is_file
    }

    /// Exists and is a directory
    pub fn is_okay_dir(&self) -> bool {
        self.exists && self.is_dir
    }

    /// Size in bytes (zero when the path does not exist)
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Whether the argument was empty, i.e. not provided
    pub fn is_unset(&self) -> bool {
        self.arg.is_empty()
    }

    /// The absolute path for display, with the home directory shortened to `~`
    pub fn tildotted(&self) -> String {
        tildotted(&self.abs)
    }
}

/// Display `path` with a leading home directory replaced by `~`
pub fn tildotted(path: &Path) -> String {
    let Some(home) = dirs::home_dir() else {
        return path.display().to_string();
    };
    match path.strip_prefix(&home) {
        Ok(rest) if rest.as_os_str().is_empty() => "~".to_string(),
        Ok(rest) => format!("~/{}", rest.display()),
        Err(_) => path.display().to_string(),
    }
}

/// Lexically normalize a path: drop `.` components and fold `..` into the
/// preceding component. Symbolic links are not resolved.
pub fn normalize(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // Never pop past the root
                if !matches!(
                    result.components().next_back(),
                    None | Some(Component::RootDir) | Some(Component::Prefix(_))
                ) {
                    result.pop();
                }
            }
            other => result.push(other.as_os_str()),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_in_classifies_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("doc.xml"), "<doc/>").unwrap();

        let props = PathProps::new_in("doc.xml", temp_dir.path());
        assert!(props.exists());
        assert!(props.is_okay_file());
        assert!(!props.is_okay_dir());
        assert_eq!(props.size(), 6);
        assert_eq!(props.abs_path(), temp_dir.path().join("doc.xml"));
        assert_eq!(props.arg(), "doc.xml");
    }

    #[test]
    fn test_new_in_classifies_directory() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("docs")).unwrap();

        let props = PathProps::new_in("docs", temp_dir.path());
        assert!(props.is_okay_dir());
        assert!(!props.is_okay_file());
    }

    #[test]
    fn test_new_in_missing_path() {
        let temp_dir = TempDir::new().unwrap();
        let props = PathProps::new_in("missing.xml", temp_dir.path());
        assert!(!props.exists());
        assert!(!props.is_okay_file());
        assert!(!props.is_okay_dir());
        assert_eq!(props.size(), 0);
    }

    #[test]
    fn test_empty_arg_is_unset() {
        let props = PathProps::new_in("", Path::new("/tmp"));
        assert!(props.is_unset());
        assert!(!props.exists());
        assert_eq!(props.abs_path(), Path::new(""));
    }

    #[test]
    fn test_absolute_arg_ignores_base() {
        let temp_dir = TempDir::new().unwrap();
        let arg = temp_dir.path().join("x.xml");
        let props = PathProps::new_in(arg.to_str().unwrap(), Path::new("/elsewhere"));
        assert_eq!(props.abs_path(), arg);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
        assert_eq!(normalize(Path::new("/../a")), PathBuf::from("/a"));
        assert_eq!(normalize(Path::new("/a/b/")), PathBuf::from("/a/b"));
    }

    #[test]
    fn test_tildotted_outside_home() {
        assert_eq!(
            tildotted(Path::new("/definitely/not/home")),
            "/definitely/not/home"
        );
    }

    #[test]
    fn test_tildotted_inside_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(tildotted(&home.join("docs/a.xml")), "~/docs/a.xml");
            assert_eq!(tildotted(&home), "~");
        }
    }
}
