//! Directory-backed resource loading. Named assets resolve to files under
//! the resource root, with a `.lmp` fallback for lump-style names.

use gamestate_traits::{ResourceError, ResourceLoader};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct DirLoader {
    root: PathBuf,
}

impl DirLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ResourceLoader for DirLoader {
    fn get(&self, name: &str) -> Result<Vec<u8>, ResourceError> {
        if let Ok(data) = fs::read(self.root.join(name)) {
            return Ok(data);
        }
        fs::read(self.root.join(format!("{name}.lmp")))
            .map_err(|_| ResourceError::NotFound(name.to_string()))
    }
}
