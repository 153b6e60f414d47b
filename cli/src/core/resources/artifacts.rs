use serde::{Deserialize, Serialize};

/// The interface for a store of persisted contract sources.
/// The store decides where a file lives; callers only name it.
pub trait SourceStore {
    /// Write `contents` to `file_name`, replacing any previous file, and
    /// return the path written to.
    fn write(&self, file_name: &str, contents: &str) -> Result<String, std::io::Error>;
}

/// What kind of payload a persisted file holds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactType {
    Sol,
    Sourcify,
    Bytecode,
}

/// A resolved source written to the store
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedArtifact {
    pub path: String,
    #[serde(rename = "type")]
    pub artifact_type: ArtifactType,
}
