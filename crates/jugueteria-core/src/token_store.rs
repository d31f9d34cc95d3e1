// Persistent storage for the single bearer credential

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;

/// File name the credential is persisted under. One token per store.
pub const TOKEN_FILE_NAME: &str = "jwt_token";

/// Storage for the bearer credential string.
///
/// No validation happens at this layer; `save` accepts whatever it is given
/// and `read` reports presence, not validity.
pub trait TokenStore: Send + Sync {
    /// Persist `token`, overwriting any previous value.
    fn save(&self, token: &str) -> io::Result<()>;

    /// The stored token, or `None` when absent.
    fn read(&self) -> Option<String>;

    /// Remove the stored token. Clearing an absent token is not an error.
    fn clear(&self) -> io::Result<()>;
}

/// Token store backed by a single file on disk.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Store the credential as `<dir>/jwt_token`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(TOKEN_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn save(&self, token: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, token)
    }

    fn read(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    None
                } else {
                    Some(token.to_string())
                }
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => {
                tracing::warn!("failed to read stored credential: {err}");
                None
            }
        }
    }

    fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

/// In-process token store for tests and embedders.
#[derive(Default)]
pub struct MemoryTokenStore {
    slot: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn save(&self, token: &str) -> io::Result<()> {
        *self.slot.write() = Some(token.to_string());
        Ok(())
    }

    fn read(&self) -> Option<String> {
        self.slot.read().clone()
    }

    fn clear(&self) -> io::Result<()> {
        *self.slot.write() = None;
        Ok(())
    }
}
