//! File-system download target and terminal notifier.
//!
//! Object URLs are `file://` URLs of staging files written to a private
//! temporary directory. Saving copies the staging file into the download
//! directory; revoking deletes it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use url::Url;
use uuid::Uuid;

use canvascal_core::{Blob, DownloadTarget, Notifier};

/// Saves exported calendars into a download directory.
#[derive(Debug, Clone)]
pub struct FsDownloadTarget {
    download_dir: PathBuf,
    staging_dir: PathBuf,
}

impl FsDownloadTarget {
    /// Creates a target saving into `download_dir`.
    pub fn new(download_dir: impl Into<PathBuf>) -> Self {
        Self {
            download_dir: download_dir.into(),
            staging_dir: std::env::temp_dir().join("canvascal"),
        }
    }

    /// Builder method to set the staging directory.
    pub fn with_staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_dir = dir.into();
        self
    }

    /// Returns the download directory.
    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    fn staged_path(object_url: &str) -> io::Result<PathBuf> {
        Url::parse(object_url)
            .ok()
            .and_then(|url| url.to_file_path().ok())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("not a staged object URL: {}", object_url),
                )
            })
    }
}

impl DownloadTarget for FsDownloadTarget {
    fn create_object_url(&self, blob: &Blob) -> io::Result<String> {
        fs::create_dir_all(&self.staging_dir)?;
        let path = self.staging_dir.join(format!("{}.ics", Uuid::new_v4()));
        fs::write(&path, blob.content())?;

        let url = Url::from_file_path(&path).map_err(|()| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("staging path is not absolute: {}", path.display()),
            )
        })?;
        Ok(url.to_string())
    }

    fn save(&self, object_url: &str, filename: &str) -> io::Result<PathBuf> {
        let filename = download_filename(filename);
        if matches!(filename.as_str(), "" | "." | "..") {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid download filename: {:?}", filename),
            ));
        }

        let staged = Self::staged_path(object_url)?;
        fs::create_dir_all(&self.download_dir)?;
        let dest = self.download_dir.join(&filename);
        fs::copy(&staged, &dest)?;

        debug!(path = %dest.display(), "Saved download");
        Ok(dest)
    }

    fn revoke_object_url(&self, object_url: &str) {
        let result = Self::staged_path(object_url).and_then(fs::remove_file);
        if let Err(e) = result {
            warn!(url = %object_url, error = %e, "Failed to remove staging file");
        }
    }
}

/// Replaces path separators with `-`, the way browsers treat suggested
/// download names.
pub fn download_filename(suggested: &str) -> String {
    suggested.replace(['/', '\\'], "-")
}

/// Prints alerts to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn alert(&self, message: &str) {
        eprintln!("{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canvascal_core::ObjectUrl;

    fn target(root: &Path) -> FsDownloadTarget {
        FsDownloadTarget::new(root.join("downloads")).with_staging_dir(root.join("staging"))
    }

    fn staged_files(root: &Path) -> usize {
        fs::read_dir(root.join("staging"))
            .map(|entries| entries.count())
            .unwrap_or(0)
    }

    #[test]
    fn create_save_revoke() {
        let dir = tempfile::tempdir().unwrap();
        let target = target(dir.path());
        let blob = Blob::calendar("BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n");

        let url = target.create_object_url(&blob).unwrap();
        assert!(url.starts_with("file://"));
        assert_eq!(staged_files(dir.path()), 1);

        let saved = target.save(&url, "term.ics").unwrap();
        assert_eq!(saved, dir.path().join("downloads").join("term.ics"));
        assert_eq!(fs::read(&saved).unwrap(), blob.content());

        target.revoke_object_url(&url);
        assert_eq!(staged_files(dir.path()), 0);
        assert!(saved.exists());
    }

    #[test]
    fn guard_revokes_on_error_path() {
        let dir = tempfile::tempdir().unwrap();
        let target = target(dir.path());
        let blob = Blob::calendar("payload");

        {
            let url = ObjectUrl::create(&target, &blob).unwrap();
            assert!(target.save(url.as_str(), "..").is_err());
        }

        assert_eq!(staged_files(dir.path()), 0);
        assert!(!dir.path().join("escape.ics").exists());
    }

    #[test]
    fn separators_stay_inside_download_dir() {
        assert_eq!(download_filename("cs/math-240.ics"), "cs-math-240.ics");
        assert_eq!(download_filename(r"a\b.ics"), "a-b.ics");

        let dir = tempfile::tempdir().unwrap();
        let target = target(dir.path());
        let url = ObjectUrl::create(&target, &Blob::calendar("payload")).unwrap();

        let saved = target.save(url.as_str(), "../escape.ics").unwrap();
        assert_eq!(saved, dir.path().join("downloads").join("..-escape.ics"));
        assert!(!dir.path().join("escape.ics").exists());
    }

    #[test]
    fn save_rejects_foreign_urls() {
        let dir = tempfile::tempdir().unwrap();
        let err = target(dir.path())
            .save("https://example.com/x.ics", "x.ics")
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn existing_file_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let target = target(dir.path());

        for content in ["first", "second"] {
            let url = ObjectUrl::create(&target, &Blob::calendar(content)).unwrap();
            target.save(url.as_str(), "same.ics").unwrap();
        }

        let saved = dir.path().join("downloads").join("same.ics");
        assert_eq!(fs::read_to_string(saved).unwrap(), "second");
    }
}
