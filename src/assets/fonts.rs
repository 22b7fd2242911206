use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;

use crate::{
    foundation::error::{StudioError, StudioResult},
    scene::catalog::FontFace,
};

/// Loads and caches font bytes for catalog faces, resolved against a fonts
/// root directory. IO happens once per face; renders after that are IO-free.
#[derive(Clone, Debug)]
pub struct FontStore {
    root: PathBuf,
    cache: HashMap<&'static str, Arc<Vec<u8>>>,
}

impl FontStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: HashMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Pre-seed a face with in-memory bytes (embedded or test fonts).
    pub fn insert(&mut self, face: &FontFace, bytes: Vec<u8>) {
        self.cache.insert(face.id, Arc::new(bytes));
    }

    pub fn bytes_for(&mut self, face: &FontFace) -> StudioResult<Arc<Vec<u8>>> {
        if let Some(bytes) = self.cache.get(face.id) {
            return Ok(bytes.clone());
        }

        let path = self.root.join(face.file);
        let bytes = std::fs::read(&path)
            .with_context(|| format!("read font '{}' for face '{}'", path.display(), face.id))
            .map_err(StudioError::from)?;
        let bytes = Arc::new(bytes);
        self.cache.insert(face.id, bytes.clone());
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::catalog;

    #[test]
    fn missing_font_file_is_an_error_naming_the_face() {
        let mut store = FontStore::new("definitely/not/a/dir");
        let err = store
            .bytes_for(catalog::font("anton").unwrap())
            .unwrap_err();
        assert!(err.to_string().contains("anton"));
    }

    #[test]
    fn inserted_bytes_bypass_the_filesystem() {
        let face = catalog::font("inter").unwrap();
        let mut store = FontStore::new("definitely/not/a/dir");
        store.insert(face, vec![1, 2, 3]);
        assert_eq!(store.bytes_for(face).unwrap().as_slice(), &[1, 2, 3]);
    }
}
