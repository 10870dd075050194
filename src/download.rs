use std::fs;
use std::io::{ErrorKind, Read, Write};
use std::path::Path;

use crate::error::FetchError;

pub const CHUNK_SIZE: usize = 16 * 1024;

pub trait RemoteSource {
    type Reader: Read;

    fn open(&self, url: &str) -> Result<Self::Reader, FetchError>;
}

impl<S: RemoteSource + ?Sized> RemoteSource for &S {
    type Reader = S::Reader;

    fn open(&self, url: &str) -> Result<Self::Reader, FetchError> {
        (**self).open(url)
    }
}

/// Blocking HTTP GET. Requests never time out; a stalled server blocks the run.
pub struct HttpSource {
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(None)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { client })
    }
}

impl RemoteSource for HttpSource {
    type Reader = reqwest::blocking::Response;

    fn open(&self, url: &str) -> Result<Self::Reader, FetchError> {
        log::debug!("GET {}", url);

        let response = self.client.get(url).send().map_err(|e| FetchError::Open {
            url: url.to_string(),
            source: Box::new(e),
        })?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(response)
    }
}

/// Fetches `url` from `source` into `output_path`, creating or truncating it.
/// Returns the number of bytes written.
pub fn download_file<S: RemoteSource>(
    source: &S,
    url: &str,
    output_path: &Path,
) -> Result<u64, FetchError> {
    log::info!("Downloading from {} to {:?}", url, output_path);

    let mut reader = source.open(url)?;

    let mut file = fs::File::create(output_path).map_err(|e| FetchError::Create {
        path: output_path.to_path_buf(),
        source: e,
    })?;

    let written = copy_chunked(&mut reader, &mut file, url, output_path)?;

    file.flush().map_err(|e| FetchError::Write {
        path: output_path.to_path_buf(),
        source: e,
    })?;

    log::info!("Download completed: {} bytes", written);
    Ok(written)
}

/// Copies `reader` into `writer` one chunk at a time, keeping read and
/// write failures apart.
pub fn copy_chunked<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    url: &str,
    output_path: &Path,
) -> Result<u64, FetchError> {
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut total = 0u64;

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(FetchError::Read {
                    url: url.to_string(),
                    source: e,
                })
            }
        };

        writer.write_all(&buf[..n]).map_err(|e| FetchError::Write {
            path: output_path.to_path_buf(),
            source: e,
        })?;
        total += n as u64;
    }

    Ok(total)
}
