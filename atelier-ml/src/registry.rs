use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::info;

use crate::catalog::Style;
use crate::error::{Error, Result};
use crate::network::{ScaleContract, StyleNetwork};

/// A loaded network shared between callers. Forward passes take `&mut`, so
/// concurrent transfers through one style serialize on the inner lock.
pub type SharedNetwork = Arc<Mutex<StyleNetwork>>;

/// Maps style identifiers to artifacts on disk and hands out inference
/// sessions.
///
/// Sessions are cached for the registry's lifetime, keyed by style: the
/// first request loads the artifact, later requests share the loaded
/// session. The cache lock is held across the load, so concurrent first
/// requests for one style perform exactly one load and receive the same
/// session.
pub struct StyleRegistry {
    model_dir: PathBuf,
    contracts: HashMap<Style, ScaleContract>,
    sessions: Mutex<HashMap<Style, SharedNetwork>>,
}

impl StyleRegistry {
    pub fn new(model_dir: impl Into<PathBuf>) -> Self {
        Self {
            model_dir: model_dir.into(),
            contracts: HashMap::new(),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Override the intensity scale for one style's artifact.
    pub fn with_contract(mut self, style: Style, contract: ScaleContract) -> Self {
        self.contracts.insert(style, contract);
        self
    }

    pub fn model_dir(&self) -> &Path {
        &self.model_dir
    }

    /// Path of the artifact backing `style`.
    pub fn resolve(&self, style: Style) -> Result<PathBuf> {
        let path = self.model_dir.join(style.artifact_file());
        if !path.is_file() {
            return Err(Error::ArtifactMissing { path });
        }
        Ok(path)
    }

    /// Load the session for `style`, or return the cached one.
    pub fn session(&self, style: Style) -> Result<SharedNetwork> {
        let mut sessions = self.sessions.lock().unwrap();
        if let Some(session) = sessions.get(&style) {
            return Ok(session.clone());
        }

        let path = self.resolve(style)?;
        let contract = self.contracts.get(&style).copied().unwrap_or_default();
        info!(style = %style, path = %path.display(), "loading style network");
        let network = StyleNetwork::load(&path, contract)?;

        let session = Arc::new(Mutex::new(network));
        sessions.insert(style, session.clone());
        Ok(session)
    }
}
