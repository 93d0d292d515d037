//! Per-request working directory
//!
//! Every request downloads into its own `<download_dir>/<uuid>/` directory.
//! Two users sending the same query at the same moment therefore never share
//! an output file, and the "newest mp3" fallback only sees files of its own
//! request. Removing the directory removes the audio file and the cookie
//! file together.

use secrecy::SecretString;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::download::cookies::write_cookies_file;

/// Transient files of one request; removed on `cleanup` or drop
#[derive(Debug)]
pub struct RequestScope {
    id: Uuid,
    dir: PathBuf,
    cookie_file: Option<PathBuf>,
    cleaned: bool,
}

impl RequestScope {
    /// Creates the request directory (and the working directory if absent),
    /// then materializes the cookie file when a secret is configured.
    pub fn open(download_dir: &Path, cookies: Option<&SecretString>) -> std::io::Result<Self> {
        let id = Uuid::new_v4();
        let dir = download_dir.join(id.to_string());
        fs_err::create_dir_all(&dir)?;

        let mut scope = Self {
            id,
            dir,
            cookie_file: None,
            cleaned: false,
        };
        // On failure the partially built scope is dropped, which removes the directory
        scope.cookie_file = write_cookies_file(cookies, &scope.dir)?;

        log::debug!("Request {} scope opened at {}", scope.id, scope.dir.display());
        Ok(scope)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Directory the extractor writes into
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Cookie file for the secondary provider, if one was written
    pub fn cookie_file(&self) -> Option<&Path> {
        self.cookie_file.as_deref()
    }

    /// Removes every file of this request. Safe to call more than once.
    pub fn cleanup(&mut self) {
        if self.cleaned {
            return;
        }
        self.cleaned = true;

        match fs_err::remove_dir_all(&self.dir) {
            Ok(()) => log::debug!("Request {} files removed", self.id),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => log::warn!("Failed to clean up request {}: {}", self.id, e),
        }
    }
}

impl Drop for RequestScope {
    fn drop(&mut self) {
        self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_creates_request_dir_inside_workdir() {
        let root = tempfile::tempdir().unwrap();
        let workdir = root.path().join("downloads");

        let scope = RequestScope::open(&workdir, None).unwrap();

        assert!(scope.dir().is_dir());
        assert_eq!(scope.dir().parent(), Some(workdir.as_path()));
        assert!(scope.cookie_file().is_none());
    }

    #[test]
    fn test_drop_removes_audio_and_cookie_files() {
        let root = tempfile::tempdir().unwrap();
        let secret = SecretString::from("cookie".to_string());

        let scope = RequestScope::open(root.path(), Some(&secret)).unwrap();
        let cookie_file = scope.cookie_file().unwrap().to_path_buf();
        let audio = scope.dir().join("track.mp3");
        std::fs::write(&audio, b"ID3").unwrap();
        assert!(cookie_file.exists());

        drop(scope);

        assert!(!audio.exists());
        assert!(!cookie_file.exists());
        assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_cleanup_is_idempotent() {
        let root = tempfile::tempdir().unwrap();
        let mut scope = RequestScope::open(root.path(), None).unwrap();

        scope.cleanup();
        scope.cleanup();
        assert!(!scope.dir().exists());
    }

    #[test]
    fn test_scopes_are_distinct() {
        let root = tempfile::tempdir().unwrap();
        let a = RequestScope::open(root.path(), None).unwrap();
        let b = RequestScope::open(root.path(), None).unwrap();
        assert_ne!(a.id(), b.id());
        assert_ne!(a.dir(), b.dir());
    }
}
