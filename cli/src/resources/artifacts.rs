use std::fs;
use std::path::PathBuf;

use crate::core::resources::artifacts::SourceStore;

/// The source store implementation that uses a flat directory on the
/// local file system. The directory is created on first write.
pub struct LocalSourceStore {
    path: PathBuf,
}

impl LocalSourceStore {
    pub fn new(path: PathBuf) -> Self {
        LocalSourceStore { path }
    }
}

impl SourceStore for LocalSourceStore {
    fn write(&self, file_name: &str, contents: &str) -> Result<String, std::io::Error> {
        fs::create_dir_all(&self.path)?;
        let file_path = self.path.join(file_name);
        fs::write(&file_path, contents)?;
        Ok(file_path.to_string_lossy().into_owned())
    }
}
