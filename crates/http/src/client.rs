//! Storage API client implementation
//!
//! Wraps a `reqwest::Client` and implements the ObjectStore trait from
//! bsc-core. Every operation normalizes its path, sends exactly one request
//! and maps a failed response onto the error taxonomy.

use std::io::SeekFrom;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use futures::TryStreamExt;
use reqwest::{Body, Method, RequestBuilder, Response};
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt, BufReader};
use tokio_util::io::{ReaderStream, StreamReader};
use url::Url;

use bsc_core::checksum;
use bsc_core::object::decode_listing;
use bsc_core::profile::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};
use bsc_core::{
    Error, ObjectReader, ObjectStore, PathKind, Profile, Result, StorageObject, StorageZone,
    UploadOptions, ZonePath,
};

/// Header carrying the zone access key on every request
pub const ACCESS_KEY_HEADER: &str = "AccessKey";

/// Header carrying the upload checksum
pub const CHECKSUM_HEADER: &str = "Checksum";

/// Buffer used when copying a download into a local file
const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Connection settings for [`StorageClient`]
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Base URL of the storage API
    pub endpoint: String,

    /// Overall timeout applied to every request
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Storage zone client
///
/// Cheap to clone; clones share the underlying connection pool. All state is
/// fixed at construction, so one client can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct StorageClient {
    http: reqwest::Client,
    endpoint: Url,
    zone: StorageZone,
}

impl StorageClient {
    /// Create a client for `zone_name` against the default endpoint
    pub fn new(zone_name: impl Into<String>, access_key: impl Into<String>) -> Result<Self> {
        Self::with_options(
            StorageZone::new(zone_name, access_key),
            ClientOptions::default(),
        )
    }

    /// Create a client with explicit connection settings
    pub fn with_options(zone: StorageZone, options: ClientOptions) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(options.timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {e}")))?;

        Self::with_http_client(zone, http, &options.endpoint)
    }

    /// Create a client on top of a caller-supplied transport.
    ///
    /// The access key header is added per request, so `http` needs no
    /// default headers. Its timeout settings apply as configured.
    pub fn with_http_client(
        zone: StorageZone,
        http: reqwest::Client,
        endpoint: &str,
    ) -> Result<Self> {
        let endpoint = Url::parse(endpoint)?;
        if endpoint.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "Endpoint cannot be used as a base URL: {endpoint}"
            )));
        }

        Ok(Self {
            http,
            endpoint,
            zone,
        })
    }

    /// Create a client from a configured profile
    pub fn from_profile(profile: &Profile) -> Result<Self> {
        Self::with_options(
            profile.storage_zone(),
            ClientOptions {
                endpoint: profile.endpoint.clone(),
                timeout: profile.timeout(),
            },
        )
    }

    pub fn zone(&self) -> &StorageZone {
        &self.zone
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// URL of a normalized path below the endpoint
    fn object_url(&self, path: &ZonePath) -> Result<Url> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|()| Error::Config(format!("Invalid endpoint: {}", self.endpoint)))?
            .pop_if_empty()
            .extend(path.segments());
        Ok(url)
    }

    fn request(&self, method: Method, path: &ZonePath) -> Result<RequestBuilder> {
        let url = self.object_url(path)?;
        tracing::debug!(%method, path = %path, "storage request");
        Ok(self
            .http
            .request(method, url)
            .header(ACCESS_KEY_HEADER, self.zone.access_key()))
    }

    /// Send a request and turn any non-success outcome into an error
    async fn send(
        &self,
        request: RequestBuilder,
        path: &ZonePath,
        checksum: Option<&str>,
    ) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| self.map_transport_error(e, path, checksum))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        tracing::debug!(status = status.as_u16(), path = %path, "storage request failed");
        Err(self.zone.map_status(status.as_u16(), path.as_str(), checksum))
    }

    fn map_transport_error(
        &self,
        err: reqwest::Error,
        path: &ZonePath,
        checksum: Option<&str>,
    ) -> Error {
        tracing::debug!(error = %err, path = %path, "transport failure");
        match err.status() {
            Some(status) => self.zone.map_status(status.as_u16(), path.as_str(), checksum),
            None => Error::Unknown { status: None },
        }
    }

    async fn put(
        &self,
        path: &ZonePath,
        body: Body,
        content_length: Option<u64>,
        checksum: Option<String>,
    ) -> Result<()> {
        let mut request = self.request(Method::PUT, path)?.body(body);
        if let Some(len) = content_length {
            request = request.header(reqwest::header::CONTENT_LENGTH, len);
        }
        if let Some(checksum) = &checksum {
            request = request.header(CHECKSUM_HEADER, checksum);
        }

        self.send(request, path, checksum.as_deref()).await?;
        tracing::debug!(path = %path, "upload complete");
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for StorageClient {
    async fn list_objects(&self, path: &str) -> Result<Vec<StorageObject>> {
        let path = self.zone.normalize(path, PathKind::Directory)?;
        let request = self.request(Method::GET, &path)?;
        let response = self.send(request, &path, None).await?;

        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_transport_error(e, &path, None))?;

        decode_listing(&body)
    }

    async fn upload_from_stream(
        &self,
        mut reader: ObjectReader,
        path: &str,
        options: UploadOptions,
    ) -> Result<()> {
        let path = self.zone.normalize(path, PathKind::File)?;

        match options.checksum {
            Some(checksum) => {
                let body = Body::wrap_stream(ReaderStream::new(reader));
                self.put(&path, body, None, Some(checksum)).await
            }
            None if options.verify_checksum => {
                // A reader can't be rewound, so it is drained once and the
                // same buffer is both hashed and sent.
                let mut data = Vec::new();
                reader.read_to_end(&mut data).await?;
                drop(reader);

                let checksum = checksum::checksum_bytes(&data);
                self.put(&path, Body::from(data), None, Some(checksum)).await
            }
            None => {
                let body = Body::wrap_stream(ReaderStream::new(reader));
                self.put(&path, body, None, None).await
            }
        }
    }

    async fn upload_from_local_file(
        &self,
        local_path: &Path,
        path: &str,
        options: UploadOptions,
    ) -> Result<()> {
        let path = self.zone.normalize(path, PathKind::File)?;
        let mut file = tokio::fs::File::open(local_path).await?;

        let checksum = match options.checksum {
            Some(checksum) => Some(checksum),
            None if options.verify_checksum => {
                let checksum = checksum::generate_async(&mut file).await?;
                file.seek(SeekFrom::Start(0)).await?;
                Some(checksum)
            }
            None => None,
        };

        // Streamed bodies carry no length of their own
        let len = file.metadata().await?.len();
        self.put(&path, Body::from(file), Some(len), checksum).await
    }

    async fn download_to_stream(&self, path: &str) -> Result<ObjectReader> {
        let path = self.zone.normalize(path, PathKind::File)?;
        let request = self.request(Method::GET, &path)?;
        let response = self.send(request, &path, None).await?;

        let stream = response.bytes_stream().map_err(std::io::Error::other);
        Ok(Box::pin(StreamReader::new(stream)))
    }

    async fn download_to_local_file(&self, path: &str, local_path: &Path) -> Result<u64> {
        let path = self.zone.normalize(path, PathKind::Any)?;
        let stream = self.download_to_stream(path.as_str()).await?;
        let mut reader = BufReader::with_capacity(COPY_BUFFER_SIZE, stream);

        let mut file = tokio::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(local_path)
            .await?;

        let written = tokio::io::copy_buf(&mut reader, &mut file).await?;
        file.flush().await?;

        tracing::debug!(path = %path, bytes = written, "download complete");
        Ok(written)
    }

    async fn delete_object(&self, path: &str) -> Result<()> {
        let path = self.zone.normalize(path, PathKind::Any)?;
        let request = self.request(Method::DELETE, &path)?;
        self.send(request, &path, None).await?;
        Ok(())
    }
}
