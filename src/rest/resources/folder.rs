//! Folders held by a storage provider.

use std::sync::Arc;

use serde_json::Value;

use crate::clients::{CallOptions, Session};
use crate::rest::resources::{File, FileEntry};
use crate::rest::{ApiResource, ResourceData, ResourceError, StorageObject};

/// Options for listing a folder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Extend the current listing instead of replacing it.
    pub append: bool,
    /// Follow pagination and list every entry.
    pub retrieve_all: bool,
}

impl ListOptions {
    /// Creates options that replace the listing with the first page.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            append: false,
            retrieve_all: false,
        }
    }

    /// Sets whether the listing is extended rather than replaced.
    #[must_use]
    pub const fn append(mut self, append: bool) -> Self {
        self.append = append;
        self
    }

    /// Sets whether every page is listed.
    #[must_use]
    pub const fn retrieve_all(mut self, retrieve_all: bool) -> Self {
        self.retrieve_all = retrieve_all;
        self
    }
}

/// A folder in a node's storage.
///
/// A folder keeps the entries of its last listing in [`Folder::files`].
///
/// # Example
///
/// ```rust,ignore
/// use osf_client::rest::resources::ListOptions;
///
/// folder.list(&ListOptions::new().retrieve_all(true), &CallOptions::default()).await?;
/// for entry in folder.files() {
///     println!("{} {:?}", entry.kind(), entry.name());
/// }
///
/// let data = folder.create("data", &CallOptions::default()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct Folder {
    pub(crate) session: Arc<Session>,
    pub(crate) data: ResourceData,
    files: Vec<FileEntry>,
}

impl Folder {
    /// Creates a Transient folder with no id or links.
    #[must_use]
    pub fn new(session: Arc<Session>) -> Self {
        Self::from_data(session, ResourceData::new(Self::TYPE))
    }

    /// Creates a folder from a JSON:API document.
    #[must_use]
    pub fn from_document(session: Arc<Session>, document: &Value) -> Self {
        let mut folder = Self::new(session);
        folder.update_from_document(document);
        folder
    }

    pub(crate) const fn from_data(session: Arc<Session>, data: ResourceData) -> Self {
        Self {
            session,
            data,
            files: Vec::new(),
        }
    }

    /// Creates a folder from a storage-backend response by resolving it to
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
        let mut folder = Self::new(session);
        folder.resolve_storage_response(document, options).await?;
        Ok(folder)
    }

    /// Returns the entries of the last listing, in server order.
    #[must_use]
    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    /// Lists the folder's entries.
    ///
    /// Each entry becomes a [`FileEntry::File`] or [`FileEntry::Folder`]
    /// according to its `kind`; entries of any other kind are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingLink`] if the folder has no `files`
    /// relationship, or [`ResourceError::Http`] if a request fails.
    pub async fn get(
        &mut self,
        list_options: &ListOptions,
        options: &CallOptions,
    ) -> Result<&[FileEntry], ResourceError> {
        let url = self.require_related("files")?;
        let options = options.clone().retrieve_all(list_options.retrieve_all);

        let Some(document) = self.session.get(&url, &options).await? else {
            return Ok(&self.files);
        };

        let entries: Vec<FileEntry> = document
            .get("data")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| FileEntry::from_document(Arc::clone(&self.session), item))
                    .collect()
            })
            .unwrap_or_default();

        if !list_options.append {
            self.files.clear();
        }
        self.files.extend(entries);
        Ok(&self.files)
    }

    /// Alias of [`Folder::get`].
    ///
    /// # Errors
    ///
    /// See [`Folder::get`].
    pub async fn list(
        &mut self,
        list_options: &ListOptions,
        options: &CallOptions,
    ) -> Result<&[FileEntry], ResourceError> {
        self.get(list_options, options).await
    }

    /// Folders cannot be downloaded.
    ///
    /// # Errors
    ///
    /// Always returns [`ResourceError::UnsupportedMethod`].
    pub fn download(&self, _options: &CallOptions) -> Result<Option<Vec<u8>>, ResourceError> {
        Err(ResourceError::UnsupportedMethod {
            resource: "folder",
            operation: "download",
        })
    }

    /// Creates a subfolder named `name` and returns it.
    ///
    /// Returns `Ok(None)` if the server sent no content.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingLink`] without a `new_folder` link,
    /// or [`ResourceError::Http`] if a request fails.
    pub async fn create(&self, name: &str, options: &CallOptions) -> Result<Option<Self>, ResourceError> {
        let url = self.require_link("new_folder")?;
        let put_options = options.with_query(&[("kind", "folder"), ("name", name)]);

        let Some(document) = self.session.put(&url, Vec::<u8>::new(), &put_options).await? else {
            return Ok(None);
        };
        let session = Arc::clone(&self.session);
        Self::from_storage_response(session, &document, &options.without_query())
            .await
            .map(Some)
    }

    /// Uploads a new file named `name` into this folder and returns it.
    ///
    /// Returns `Ok(None)` if the server sent no content.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingLink`] without an `upload` link, or
    /// [`ResourceError::Http`] if a request fails.
    pub async fn upload(
        &self,
        name: &str,
        contents: impl Into<Vec<u8>>,
        options: &CallOptions,
    ) -> Result<Option<File>, ResourceError> {
        let url = self.require_link("upload")?;
        let put_options = options.with_query(&[("kind", "file"), ("name", name)]);

        let Some(document) = self.session.put(&url, contents, &put_options).await? else {
            return Ok(None);
        };
        let session = Arc::clone(&self.session);
        File::from_storage_response(session, &document, &options.without_query())
            .await
            .map(Some)
    }
}

impl ApiResource for Folder {
    const NAME: &'static str = "Folder";
    const TYPE: &'static str = "files";

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

impl StorageObject for Folder {}
