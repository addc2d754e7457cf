//! Lexical dataset bootstrap
//!
//! Packages are nltk_data corpus archives unpacked below
//! `<data_dir>/corpora/<package>`. A package that is already present is
//! never fetched again.

use indicatif::{ProgressBar, ProgressStyle};
use std::io::{Cursor, IsTerminal};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::core::config::DownloadConfig;
use crate::core::errors::{NatlangError, Result};

/// Outcome of [`DatasetManager::ensure`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetStatus {
    /// Package directory existed; nothing was fetched
    AlreadyPresent(PathBuf),
    /// Package was downloaded and unpacked
    Downloaded(PathBuf),
}

/// Downloads and unpacks dataset packages into a data directory
#[derive(Debug, Clone)]
pub struct DatasetManager {
    client: reqwest::Client,
    config: DownloadConfig,
    data_dir: PathBuf,
}

impl DatasetManager {
    /// Create a manager with an HTTP client built from `config`
    pub fn new(config: DownloadConfig, data_dir: impl Into<PathBuf>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            client,
            config,
            data_dir: data_dir.into(),
        })
    }

    /// Where `package` lives once unpacked
    pub fn package_dir(&self, package: &str) -> PathBuf {
        self.data_dir.join("corpora").join(package)
    }

    /// Archive URL for `package`
    pub fn package_url(&self, package: &str) -> String {
        format!(
            "{}/corpora/{}.zip",
            self.config.base_url.trim_end_matches('/'),
            package
        )
    }

    /// Make sure every configured package is present
    pub async fn ensure_all(&self) -> Result<Vec<DatasetStatus>> {
        let mut statuses = Vec::new();
        for package in &self.config.packages {
            statuses.push(self.ensure(package).await?);
        }
        Ok(statuses)
    }

    /// Download and unpack `package` unless it is already present
    pub async fn ensure(&self, package: &str) -> Result<DatasetStatus> {
        let target = self.package_dir(package);
        if target.is_dir() {
            debug!("Package {} already present at {}", package, target.display());
            return Ok(DatasetStatus::AlreadyPresent(target));
        }

        info!("Downloading package {} into {}", package, self.data_dir.display());
        let archive = self.download(package).await?;
        unpack(&archive, package, &target)?;
        info!("Installed package {} at {}", package, target.display());

        Ok(DatasetStatus::Downloaded(target))
    }

    /// Fetch the archive, retrying with exponential backoff
    async fn download(&self, package: &str) -> Result<Vec<u8>> {
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                debug!("Retry attempt {} for package {}", attempt, package);
                sleep(retry_delay(self.config.retry_delay_ms, attempt)).await;
            }

            match self.fetch(package).await {
                Ok(bytes) => {
                    if attempt > 0 {
                        info!("Downloaded {} after {} retries", package, attempt);
                    }
                    return Ok(bytes);
                }
                Err(e) => {
                    warn!("Download of {} failed: {}", package, e);
                    // a missing package will not appear on retry
                    let not_found = matches!(e, NatlangError::DownloadError { status: 404, .. });
                    last_error = Some(e);
                    if not_found {
                        break;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            NatlangError::InternalError(format!("no download attempted for {}", package))
        }))
    }

    async fn fetch(&self, package: &str) -> Result<Vec<u8>> {
        let url = self.package_url(package);
        let mut response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(NatlangError::DownloadError {
                package: package.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        let progress = progress_bar(response.content_length(), package);
        let mut bytes = Vec::with_capacity(response.content_length().unwrap_or(0) as usize);
        while let Some(chunk) = response.chunk().await? {
            progress.inc(chunk.len() as u64);
            bytes.extend_from_slice(&chunk);
        }
        progress.finish_and_clear();

        Ok(bytes)
    }
}

/// Backoff before retry `attempt` (1-based): `delay_ms * 2^(attempt - 1)`, saturating
fn retry_delay(delay_ms: u64, attempt: u32) -> Duration {
    let factor = 2_u64.checked_pow(attempt.saturating_sub(1)).unwrap_or(u64::MAX);
    Duration::from_millis(delay_ms.saturating_mul(factor))
}

fn progress_bar(length: Option<u64>, package: &str) -> ProgressBar {
    if !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }

    let pb = match length {
        Some(len) => {
            let pb = ProgressBar::new(len);
            if let Ok(style) = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta}) {msg}")
            {
                pb.set_style(style.progress_chars("=>-"));
            }
            pb
        }
        None => ProgressBar::new_spinner(),
    };
    pb.set_message(package.to_string());
    pb
}

/// Unpack a zip archive so that its contents end up at `target`
///
/// The archive is extracted into a staging directory next to `target` and
/// renamed into place, so an interrupted unpack never looks installed.
pub fn unpack(archive: &[u8], package: &str, target: &Path) -> Result<()> {
    let parent = target.parent().ok_or_else(|| NatlangError::ConfigError {
        message: format!("{} has no parent directory", target.display()),
    })?;
    std::fs::create_dir_all(parent)?;

    let staging = parent.join(format!(".{}.partial", package));
    if staging.exists() {
        std::fs::remove_dir_all(&staging)?;
    }

    let mut zip = zip::ZipArchive::new(Cursor::new(archive))?;
    zip.extract(&staging)?;

    // nltk_data archives wrap everything in a top-level `<package>/` folder
    let nested = staging.join(package);
    if nested.is_dir() {
        std::fs::rename(&nested, target)?;
        std::fs::remove_dir_all(&staging)?;
    } else {
        std::fs::rename(&staging, target)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn archive(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buffer);
            let options = zip::write::FileOptions::default();
            for (name, content) in entries {
                writer.start_file(*name, options).unwrap();
                writer.write_all(content.as_bytes()).unwrap();
            }
            writer.finish().unwrap();
        }
        buffer.into_inner()
    }

    fn offline_config() -> DownloadConfig {
        DownloadConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            max_retries: 0,
            retry_delay_ms: 1,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_present_package_is_not_downloaded() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("corpora/wordnet")).unwrap();

        let manager = DatasetManager::new(offline_config(), dir.path()).unwrap();
        let status = manager.ensure("wordnet").await.unwrap();
        assert_eq!(
            status,
            DatasetStatus::AlreadyPresent(dir.path().join("corpora/wordnet"))
        );
    }

    #[tokio::test]
    async fn test_unreachable_server_propagates_error() {
        let dir = tempfile::tempdir().unwrap();
        let manager = DatasetManager::new(offline_config(), dir.path()).unwrap();

        let err = manager.ensure("omw-1.4").await.unwrap_err();
        assert!(!err.is_failure());
        assert!(!manager.package_dir("omw-1.4").exists());
    }

    #[test]
    fn test_retry_delay_backoff() {
        assert_eq!(retry_delay(1000, 1), Duration::from_millis(1000));
        assert_eq!(retry_delay(1000, 2), Duration::from_millis(2000));
        assert_eq!(retry_delay(1000, 4), Duration::from_millis(8000));
    }

    #[test]
    fn test_retry_delay_saturates() {
        assert_eq!(retry_delay(1000, 65), Duration::from_millis(u64::MAX));
        assert_eq!(retry_delay(u64::MAX, 3), Duration::from_millis(u64::MAX));
        assert_eq!(retry_delay(0, 200), Duration::ZERO);
    }

    #[test]
    fn test_package_url() {
        let manager = DatasetManager::new(
            DownloadConfig {
                base_url: "https://example.org/packages/".to_string(),
                ..Default::default()
            },
            "/tmp/data",
        )
        .unwrap();
        assert_eq!(
            manager.package_url("wordnet"),
            "https://example.org/packages/corpora/wordnet.zip"
        );
        assert_eq!(
            manager.package_dir("wordnet"),
            PathBuf::from("/tmp/data/corpora/wordnet")
        );
    }

    #[test]
    fn test_unpack_nested_archive() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("corpora/wordnet");
        let bytes = archive(&[
            ("wordnet/index.noun", "dog n 1 0 1 0 00000000\n"),
            ("wordnet/LICENSE", "license\n"),
        ]);

        unpack(&bytes, "wordnet", &target).unwrap();
        assert!(target.join("index.noun").is_file());
        assert!(target.join("LICENSE").is_file());
        assert!(!dir.path().join("corpora/.wordnet.partial").exists());
    }

    #[test]
    fn test_unpack_flat_archive() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("corpora/omw-1.4");
        let bytes = archive(&[("fra/wn-data-fra.tab", "# header\n")]);

        unpack(&bytes, "omw-1.4", &target).unwrap();
        assert!(target.join("fra/wn-data-fra.tab").is_file());
    }

    #[test]
    fn test_unpack_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("corpora/wordnet");
        let err = unpack(b"not a zip", "wordnet", &target).unwrap_err();
        assert!(matches!(err, NatlangError::ZipError(_)));
        assert!(!target.exists());
    }

    #[test]
    fn test_ensure_all_with_block_on() {
        let dir = tempfile::tempdir().unwrap();
        for package in ["wordnet", "omw-1.4"] {
            std::fs::create_dir_all(dir.path().join("corpora").join(package)).unwrap();
        }

        let manager = DatasetManager::new(offline_config(), dir.path()).unwrap();
        let statuses = tokio_test::block_on(manager.ensure_all()).unwrap();
        assert_eq!(statuses.len(), 2);
        assert!(statuses
            .iter()
            .all(|s| matches!(s, DatasetStatus::AlreadyPresent(_))));
    }
}
