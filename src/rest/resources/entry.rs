//! Storage entries: the tagged File/Folder variant and storage resolution.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::clients::{CallOptions, HttpMethod, Session};
use crate::rest::resources::{File, Folder};
use crate::rest::{
    build_path, get_path, unwrap_data, AttributeBag, ResourceData, ResourceError,
    ResourceOperation, ResourcePath,
};

/// The default internal storage provider.
pub const OSF_STORAGE: &str = "osfstorage";

/// Canonical URLs of storage entries, keyed by what the storage backend
/// reports. Internal storage entries resolve by path alone; any other
/// provider needs the node and provider too.
pub const STORAGE_PATHS: &[ResourcePath] = &[
    ResourcePath::new(
        HttpMethod::Get,
        ResourceOperation::Resolve,
        &["path"],
        "v2/files{path}",
    ),
    ResourcePath::new(
        HttpMethod::Get,
        ResourceOperation::Resolve,
        &["resource", "provider", "path"],
        "v2/nodes/{resource}/files/{provider}{path}?info",
    ),
];

/// Returns the canonical API URL for a storage-backend response.
///
/// # Errors
///
/// Returns [`ResourceError::MalformedDocument`] if the response lacks
/// `provider`, `path`, or (for external providers) `resource`.
pub fn storage_resolution_url(document: &Value) -> Result<String, ResourceError> {
    let data = unwrap_data(document);
    let attributes = match data.get("attributes") {
        Some(attributes @ Value::Object(_)) => AttributeBag::from_document(attributes),
        _ => AttributeBag::from_document(data),
    };

    let field = |key: &str| {
        attributes
            .get_str(key)
            .ok_or_else(|| ResourceError::MalformedDocument {
                resource: "storage",
                reason: format!("missing '{key}'"),
            })
    };

    let provider = field("provider")?;
    let path = field("path")?;

    let path = encode_storage_path(path);
    let mut ids: HashMap<&str, &str> = HashMap::from([("path", path.as_str())]);
    if provider != OSF_STORAGE {
        ids.insert("provider", provider);
        ids.insert("resource", field("resource")?);
    }

    let available_ids: Vec<&str> = ids.keys().copied().collect();
    let template = get_path(STORAGE_PATHS, ResourceOperation::Resolve, &available_ids)
        .ok_or(ResourceError::PathResolutionFailed {
            resource: "storage",
            operation: ResourceOperation::Resolve.as_str(),
        })?
        .template;

    Ok(build_path(template, &ids))
}

/// Percent-encodes each segment of a storage path, keeping the slashes.
///
/// External providers report paths built from user file names, which may
/// contain `#`, `?` or `%`.
fn encode_storage_path(path: &str) -> String {
    path.split('/')
        .map(urlencoding::encode)
        .collect::<Vec<_>>()
        .join("/")
}

/// A storage entry: either a file or a folder, selected by
/// `attributes.kind`.
#[derive(Debug, Clone)]
pub enum FileEntry {
    /// A file.
    File(File),
    /// A folder.
    Folder(Folder),
}

impl FileEntry {
    /// Builds an entry from a document by its `kind`.
    ///
    /// Returns `None` for any kind other than `"file"` or `"folder"`.
    #[must_use]
    pub fn from_document(session: Arc<Session>, document: &Value) -> Option<Self> {
        let data = ResourceData::from_document(document);
        let kind = data.kind().map(ToString::to_string);
        match kind.as_deref() {
            Some("file") => Some(Self::File(File::from_data(session, data))),
            Some("folder") => Some(Self::Folder(Folder::from_data(session, data))),
            other => {
                tracing::warn!(kind = ?other, id = ?data.id(), "Skipping storage entry of unknown kind");
                None
            }
        }
    }

    /// Resolves a storage-backend response to its canonical entity.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MalformedDocument`] if the response cannot
    /// be resolved or the resolved entity has an unknown kind, or
    /// [`ResourceError::Http`] if the follow-up request fails.
    pub async fn from_storage_response(
        session: Arc<Session>,
        document: &Value,
        options: &CallOptions,
    ) -> Result<Self, ResourceError> {
        let url = storage_resolution_url(document)?;
        let resolved = session
            .get(&url, options)
            .await?
            .ok_or_else(|| ResourceError::MalformedDocument {
                resource: "storage",
                reason: format!("no content at {url}"),
            })?;

        Self::from_document(session, &resolved).ok_or_else(|| ResourceError::MalformedDocument {
            resource: "storage",
            reason: "resolved entry is neither a file nor a folder".to_string(),
        })
    }

    /// Returns the entry's state.
    #[must_use]
    pub const fn data(&self) -> &ResourceData {
        match self {
            Self::File(file) => &file.data,
            Self::Folder(folder) => &folder.data,
        }
    }

    /// Returns the entry's id.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.data().id()
    }

    /// Returns the entry's name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.data().name()
    }

    /// Returns `"file"` or `"folder"`.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::File(_) => "file",
            Self::Folder(_) => "folder",
        }
    }

    /// Returns `true` for a file.
    #[must_use]
    pub const fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }

    /// Returns `true` for a folder.
    #[must_use]
    pub const fn is_folder(&self) -> bool {
        matches!(self, Self::Folder(_))
    }

    /// Returns the file, if this entry is one.
    #[must_use]
    pub const fn as_file(&self) -> Option<&File> {
        match self {
            Self::File(file) => Some(file),
            Self::Folder(_) => None,
        }
    }

    /// Returns the folder, if this entry is one.
    #[must_use]
    pub const fn as_folder(&self) -> Option<&Folder> {
        match self {
            Self::Folder(folder) => Some(folder),
            Self::File(_) => None,
        }
    }

    /// Returns the file mutably, if this entry is one.
    pub fn as_file_mut(&mut self) -> Option<&mut File> {
        match self {
            Self::File(file) => Some(file),
            Self::Folder(_) => None,
        }
    }

    /// Returns the folder mutably, if this entry is one.
    pub fn as_folder_mut(&mut self) -> Option<&mut Folder> {
        match self {
            Self::Folder(folder) => Some(folder),
            Self::File(_) => None,
        }
    }
}

impl From<File> for FileEntry {
    fn from(file: File) -> Self {
        Self::File(file)
    }
}

impl From<Folder> for FileEntry {
    fn from(folder: Folder) -> Self {
        Self::Folder(folder)
    }
}
