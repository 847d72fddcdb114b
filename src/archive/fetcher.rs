use crate::error::{LegendError, Result};
use crate::settings::Settings;
use crate::utils::filename::archive_url;
use reqwest::blocking::Client;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Where a year's archive comes from.
pub trait ArchiveSource {
    /// Human-readable origin of the archive, for logs and errors.
    fn location(&self, year: u16) -> String;

    /// Write the archive for `year` to `dest`, returning its size in bytes.
    fn fetch(&self, year: u16, dest: &Path) -> Result<u64>;
}

/// Downloads archives from the electoral court's open-data server.
pub struct HttpArchiveSource {
    client: Client,
    base_url: String,
}

impl HttpArchiveSource {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(|e| LegendError::download(&settings.base_url, e))?;

        Ok(Self {
            client,
            base_url: settings.base_url.clone(),
        })
    }
}

impl ArchiveSource for HttpArchiveSource {
    fn location(&self, year: u16) -> String {
        archive_url(&self.base_url, year)
    }

    fn fetch(&self, year: u16, dest: &Path) -> Result<u64> {
        let url = self.location(year);
        info!(%url, "downloading archive");

        let mut response = self
            .client
            .get(&url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| LegendError::download(&url, e))?;

        let expected = response.content_length();
        let mut writer = BufWriter::new(File::create(dest)?);
        let received = response
            .copy_to(&mut writer)
            .map_err(|e| LegendError::download(&url, e))?;
        writer.flush()?;

        if let Some(expected) = expected {
            if expected != received {
                return Err(LegendError::download(
                    &url,
                    format!("truncated transfer: received {} of {} bytes", received, expected),
                ));
            }
        }

        debug!(bytes = received, path = %dest.display(), "archive downloaded");
        Ok(received)
    }
}

/// Uses an archive already on disk instead of downloading one.
pub struct LocalArchiveSource {
    path: PathBuf,
}

impl LocalArchiveSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ArchiveSource for LocalArchiveSource {
    fn location(&self, _year: u16) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self, _year: u16, dest: &Path) -> Result<u64> {
        info!(path = %self.path.display(), "using local archive");
        fs::copy(&self.path, dest).map_err(|e| LegendError::download(&self.location(0), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use std::net::TcpListener;
    use std::thread;
    use tempfile::TempDir;

    /// Answer a single request on a local port with a canned response.
    fn serve_once(response: &'static [u8]) -> Result<u16> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut request = [0u8; 1024];
                let _ = stream.read(&mut request);
                let _ = stream.write_all(response);
            }
        });
        Ok(port)
    }

    fn local_source(port: u16) -> Result<HttpArchiveSource> {
        let settings = Settings::default()
            .with_base_url(format!("http://127.0.0.1:{}/legendas", port))
            .with_timeout_secs(5);
        HttpArchiveSource::new(&settings)
    }

    #[test]
    fn test_http_location() -> Result<()> {
        let settings = Settings::default().with_base_url("https://example.org/odsele/consulta_legendas");
        let source = HttpArchiveSource::new(&settings)?;
        assert_eq!(
            source.location(2016),
            "https://example.org/odsele/consulta_legendas/consulta_legendas_2016.zip"
        );
        Ok(())
    }

    #[test]
    fn test_http_connection_failure_is_download_error() -> Result<()> {
        // bind then release a port so nothing is listening on it
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0")?;
            listener.local_addr()?.port()
        };
        let settings = Settings::default()
            .with_base_url(format!("http://127.0.0.1:{}/legendas", port))
            .with_timeout_secs(5);
        let source = HttpArchiveSource::new(&settings)?;

        let dir = TempDir::new()?;
        let err = source
            .fetch(2016, &dir.path().join("archive.zip"))
            .unwrap_err();
        assert!(matches!(err, LegendError::Download { .. }));
        Ok(())
    }

    #[test]
    fn test_http_error_status_is_download_error() -> Result<()> {
        let port = serve_once(
            b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )?;
        let source = local_source(port)?;

        let dir = TempDir::new()?;
        let err = source
            .fetch(2016, &dir.path().join("archive.zip"))
            .unwrap_err();
        match err {
            LegendError::Download { url, message } => {
                assert!(url.ends_with("consulta_legendas_2016.zip"));
                assert!(message.contains("404"), "{message}");
            }
            other => panic!("unexpected error: {other}"),
        }
        Ok(())
    }

    #[test]
    fn test_http_truncated_body_is_download_error() -> Result<()> {
        let port = serve_once(
            b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\nConnection: close\r\n\r\nPK",
        )?;
        let source = local_source(port)?;

        let dir = TempDir::new()?;
        let err = source
            .fetch(2016, &dir.path().join("archive.zip"))
            .unwrap_err();
        assert!(matches!(err, LegendError::Download { .. }));
        Ok(())
    }

    #[test]
    fn test_local_source_copies_archive() -> Result<()> {
        let dir = TempDir::new()?;
        let src = dir.path().join("input.zip");
        fs::write(&src, b"PK\x05\x06")?;

        let source = LocalArchiveSource::new(&src);
        let dest = dir.path().join("copy.zip");
        assert_eq!(source.fetch(2016, &dest)?, 4);
        assert_eq!(fs::read(&dest)?, b"PK\x05\x06");
        Ok(())
    }

    #[test]
    fn test_local_source_missing_file() {
        let dir = TempDir::new().unwrap();
        let source = LocalArchiveSource::new(dir.path().join("missing.zip"));
        let err = source.fetch(2016, &dir.path().join("copy.zip")).unwrap_err();
        assert!(matches!(err, LegendError::Download { .. }));
    }
}
