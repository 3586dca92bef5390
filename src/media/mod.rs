// src/media/mod.rs
// Photo pass-through: uploads land in an HTTP object bucket under fixed
// key conventions. Rendition preparation sits behind PhotoPipeline so the
// actual resizing can run outside this service.

use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

use crate::domain::CageId;

pub const PHOTO_CONTENT_TYPE: &str = "image/jpeg";

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("object upload failed for '{key}': {source}")]
    Upload {
        key: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("object write failed for '{key}': {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

/// Original/thumbnail object keys for a cage photo.
pub fn cage_photo_keys(cage: CageId) -> (String, String) {
    (format!("{cage}.jpeg"), format!("{cage}_thumb.jpeg"))
}

/// Original/thumbnail object keys for a dog photo.
pub fn dog_photo_keys(cage: CageId, dog_id: &str) -> (String, String) {
    (
        format!("cage_{cage}_dog_{dog_id}.jpeg"),
        format!("cage_{cage}_dog_{dog_id}_thumb.jpeg"),
    )
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put(&self, key: &str, bytes: Bytes, content_type: &str) -> Result<(), MediaError>;

    /// Public URL a browser can fetch the object from.
    fn public_url(&self, key: &str) -> String;
}

/// Bucket reachable over plain HTTP: objects live at
/// `<endpoint>/<bucket>/<key>`, optionally behind a bearer token.
pub struct HttpObjectStore {
    endpoint: String,
    bucket: String,
    public_base: String,
    bearer_token: Option<String>,
    client: reqwest::Client,
}

impl HttpObjectStore {
    pub fn new(endpoint: String, bucket: String, public_base: String) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            bucket,
            public_base: public_base.trim_end_matches('/').to_string(),
            bearer_token: None,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_bearer_token(mut self, token: Option<String>) -> Self {
        self.bearer_token = token;
        self
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.endpoint, self.bucket, key)
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn put(&self, key: &str, bytes: Bytes, content_type: &str) -> Result<(), MediaError> {
        let mut request = self
            .client
            .put(self.object_url(key))
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes);
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        request
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|source| MediaError::Upload {
                key: key.to_string(),
                source,
            })?;

        debug!(key, "stored object");
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base, key)
    }
}

/// Directory-backed store for development and tests.
pub struct DirObjectStore {
    root: PathBuf,
    public_base: String,
}

impl DirObjectStore {
    pub fn new(root: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base: public_base.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ObjectStore for DirObjectStore {
    async fn put(&self, key: &str, bytes: Bytes, _content_type: &str) -> Result<(), MediaError> {
        let path = self.root.join(key);
        let write = async {
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(&path, &bytes).await
        };
        write.await.map_err(|source| MediaError::Write {
            key: key.to_string(),
            source,
        })
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base, key)
    }
}

/// Both renditions of an uploaded photo, ready for the bucket.
pub struct PreparedPhoto {
    pub original: Bytes,
    pub thumbnail: Bytes,
}

/// Turns uploaded bytes into the renditions the bucket serves. Resizing is
/// not this service's job; implementations may call out to whatever
/// processor the deployment ships.
pub trait PhotoPipeline: Send + Sync {
    fn prepare(&self, image: Bytes) -> Result<PreparedPhoto, MediaError>;
}

/// Stores the uploaded bytes unmodified under both keys.
pub struct PassthroughPipeline;

impl PhotoPipeline for PassthroughPipeline {
    fn prepare(&self, image: Bytes) -> Result<PreparedPhoto, MediaError> {
        Ok(PreparedPhoto {
            original: image.clone(),
            thumbnail: image,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photo_keys() {
        let cage = CageId::new(5).unwrap();
        assert_eq!(cage_photo_keys(cage), ("5.jpeg".into(), "5_thumb.jpeg".into()));
        let (orig, thumb) = dog_photo_keys(cage, "abc");
        assert_eq!(orig, "cage_5_dog_abc.jpeg");
        assert_eq!(thumb, "cage_5_dog_abc_thumb.jpeg");
    }

    #[test]
    fn test_http_store_urls() {
        let store = HttpObjectStore::new(
            "http://bucket.local/".to_string(),
            "photos".to_string(),
            "https://cdn.example.com/photos/".to_string(),
        );
        assert_eq!(store.object_url("1.jpeg"), "http://bucket.local/photos/1.jpeg");
        assert_eq!(store.public_url("1.jpeg"), "https://cdn.example.com/photos/1.jpeg");
    }

    #[tokio::test]
    async fn test_dir_store_writes_objects() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirObjectStore::new(dir.path(), "http://media.local");
        store
            .put("3.jpeg", Bytes::from_static(b"jpeg-bytes"), PHOTO_CONTENT_TYPE)
            .await
            .unwrap();
        let stored = std::fs::read(dir.path().join("3.jpeg")).unwrap();
        assert_eq!(stored, b"jpeg-bytes");
        assert_eq!(store.public_url("3.jpeg"), "http://media.local/3.jpeg");
    }
}
