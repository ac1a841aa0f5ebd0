//! Storage providers attached to a node.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use serde_json::Value;

use crate::clients::Session;
use crate::rest::resources::Folder;
use crate::rest::{ApiResource, ResourceData};

/// The root folder of one storage backend attached to a node, such as
/// internal `osfstorage` or an external add-on.
///
/// A provider behaves like a [`Folder`] (it derefs to one) and carries the
/// backend's name.
#[derive(Debug, Clone)]
pub struct Provider {
    folder: Folder,
    provider_name: String,
}

impl Provider {
    /// Creates a provider from an entry of a node's provider listing.
    ///
    /// The name is taken from `attributes.provider`, falling back to
    /// `attributes.name`.
    #[must_use]
    pub fn from_document(session: Arc<Session>, document: &Value) -> Self {
        let folder = Folder::from_document(session, document);
        let provider_name = folder
            .data()
            .provider()
            .or_else(|| folder.data().name())
            .unwrap_or_default()
            .to_string();
        Self {
            folder,
            provider_name,
        }
    }

    /// Returns the backend name, e.g. `"osfstorage"`.
    #[must_use]
    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }

    /// Unwraps the root folder.
    #[must_use]
    pub fn into_folder(self) -> Folder {
        self.folder
    }
}

impl Deref for Provider {
    type Target = Folder;

    fn deref(&self) -> &Self::Target {
        &self.folder
    }
}

impl DerefMut for Provider {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.folder
    }
}

impl ApiResource for Provider {
    const NAME: &'static str = "Provider";
    const TYPE: &'static str = "files";

    fn session(&self) -> &Arc<Session> {
        self.folder.session()
    }

    fn data(&self) -> &ResourceData {
        self.folder.data()
    }

    fn data_mut(&mut self) -> &mut ResourceData {
        self.folder.data_mut()
    }
}
