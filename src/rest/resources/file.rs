//! Files held by a storage provider.

use std::sync::Arc;

use serde_json::Value;

use crate::clients::{CallOptions, HttpMethod, JsonApiRequest, Session};
use crate::rest::{ApiResource, ResourceData, ResourceError, StorageObject};

/// A file in a node's storage.
///
/// Files are usually obtained from a [`Folder`](super::Folder) listing or
/// from a storage action. Besides the [`StorageObject`] actions, a file can
/// be downloaded and overwritten in place.
///
/// # Example
///
/// ```rust,ignore
/// use osf_client::rest::StorageObject;
///
/// let mut file = folder.files()[0].as_file().unwrap().clone();
/// let bytes = file.download(&CallOptions::default()).await?;
/// file.rename("renamed.csv", &CallOptions::default()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct File {
    pub(crate) session: Arc<Session>,
    pub(crate) data: ResourceData,
}

impl File {
    /// Creates a Transient file with no id or links.
    #[must_use]
    pub fn new(session: Arc<Session>) -> Self {
        Self {
            session,
            data: ResourceData::new(Self::TYPE),
        }
    }

    /// Creates a file from a JSON:API document.
    #[must_use]
    pub fn from_document(session: Arc<Session>, document: &Value) -> Self {
        let mut file = Self::new(session);
        file.update_from_document(document);
        file
    }

    pub(crate) const fn from_data(session: Arc<Session>, data: ResourceData) -> Self {
        Self { session, data }
    }

    /// Creates a file from a storage-backend response by resolving it to
    /// its canonical entity.
    ///
    /// # Errors
    ///
    /// See [`StorageObject::resolve_storage_response`].
    pub async fn from_storage_response(
        session: Arc<Session>,
        document: &Value,
        options: &CallOptions,
    ) -> Result<Self, ResourceError> {
        let mut file = Self::new(session);
        file.resolve_storage_response(document, options).await?;
        Ok(file)
    }

    /// Fetches the file from `url`, else from its `self` link.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingLocator`] when neither is available,
    /// or [`ResourceError::Http`] if the request fails.
    pub async fn get(&mut self, url: Option<&str>, options: &CallOptions) -> Result<(), ResourceError> {
        self.fetch(url, options).await
    }

    /// Downloads the file contents. The file itself is not modified.
    ///
    /// Returns `Ok(None)` if the request was throttled with retry disabled.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingLink`] without a `download` link, or
    /// [`ResourceError::Http`] if the request fails.
    pub async fn download(&self, options: &CallOptions) -> Result<Option<Vec<u8>>, ResourceError> {
        let url = self.require_link("download")?;
        let request = JsonApiRequest::builder(HttpMethod::Get, url)
            .options(options)
            .build()?;
        Ok(self.session.request_bytes(request).await?)
    }

    /// Uploads new contents for this file.
    ///
    /// `kind=file` is added to the query. Returns the storage-backend
    /// response.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingLink`] without an `upload` link, or
    /// [`ResourceError::Http`] if the request fails.
    pub async fn upload(
        &self,
        contents: impl Into<Vec<u8>>,
        options: &CallOptions,
    ) -> Result<Option<Value>, ResourceError> {
        let url = self.require_link("upload")?;
        let options = options.with_query(&[("kind", "file")]);
        Ok(self.session.put(&url, contents, &options).await?)
    }
}

impl ApiResource for File {
    const NAME: &'static str = "File";
    const TYPE: &'static str = "file";

    fn session(&self) -> &Arc<Session> {
        &self.session
    }

    fn data(&self) -> &ResourceData {
        &self.data
    }

    fn data_mut(&mut self) -> &mut ResourceData {
        &mut self.data
    }
}

impl StorageObject for File {}
