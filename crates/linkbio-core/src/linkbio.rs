use linkbio_store::{FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore, StoreAdapter};
use linkbio_types::User;
use tracing::info;

use crate::config::LinkbioConfig;
use crate::error::CoreResult;
use crate::links::LinkManager;
use crate::repository::UserRepository;
use crate::session::SessionManager;

/// High-level Linkbio API over a single store backend.
pub struct Linkbio<S> {
    adapter: StoreAdapter<S>,
}

impl Linkbio<FileKeyValueStore> {
    /// Open the file-backed store described by `config`.
    pub fn open(config: &LinkbioConfig) -> CoreResult<Self> {
        let store = FileKeyValueStore::open(&config.data_dir)?;
        let adapter = StoreAdapter::with_prefix(store, &config.key_prefix)?;
        info!(data_dir = %config.data_dir.display(), "linkbio store opened");
        Ok(Self { adapter })
    }
}

impl Linkbio<InMemoryKeyValueStore> {
    /// An ephemeral instance for tests and demos.
    pub fn in_memory() -> Self {
        Self::with_store(InMemoryKeyValueStore::new())
    }
}

impl<S: KeyValueStore> Linkbio<S> {
    /// Wrap any backend using the unprefixed key names.
    pub fn with_store(store: S) -> Self {
        Self {
            adapter: StoreAdapter::new(store),
        }
    }

    pub fn users(&self) -> UserRepository<'_, S> {
        UserRepository::new(&self.adapter)
    }

    pub fn sessions(&self) -> SessionManager<'_, S> {
        SessionManager::new(&self.adapter)
    }

    pub fn links(&self) -> LinkManager<'_, S> {
        LinkManager::new(&self.adapter)
    }

    /// Resolve a public profile address. Works without a session.
    pub fn profile(&self, username: &str) -> CoreResult<Option<User>> {
        self.users().find_by_username(username)
    }
}
