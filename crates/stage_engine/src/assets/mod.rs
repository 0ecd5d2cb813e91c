//! Opaque asset handles
//!
//! Meshes, textures and terrain geometry are loaded and owned by external
//! collaborators; the scene core only ever sees opaque handles. A lookup for
//! a handle that is no longer registered answers `None` rather than failing.

use crate::foundation::collections::{HandleMap, TypedHandle};

/// Marker for mesh resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshTag;

/// Marker for texture resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureTag;

/// Marker for terrain resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TerrainTag;

/// Opaque handle to loaded mesh geometry
pub type MeshHandle = TypedHandle<MeshTag>;

/// Opaque handle to a loaded texture
pub type TextureHandle = TypedHandle<TextureTag>;

/// Opaque handle to loaded terrain geometry
pub type TerrainHandle = TypedHandle<TerrainTag>;

#[derive(Debug)]
struct TextureEntry {
    name: String,
    width: u32,
    height: u32,
}

/// Registry that mints opaque handles for named resources.
///
/// Stands in for the asset pipeline: loaders register what they loaded and
/// hand the returned handle to scene code.
#[derive(Debug, Default)]
pub struct AssetCatalog {
    meshes: HandleMap<String>,
    textures: HandleMap<TextureEntry>,
    terrains: HandleMap<String>,
}

impl AssetCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register loaded mesh geometry under a name
    pub fn register_mesh(&mut self, name: &str) -> MeshHandle {
        TypedHandle::new(self.meshes.insert(name.to_string()))
    }

    /// The name a mesh was registered under
    pub fn mesh_name(&self, handle: MeshHandle) -> Option<&str> {
        self.meshes.get(handle.key()).map(String::as_str)
    }

    /// Register a loaded texture under a name, with its pixel dimensions
    pub fn register_texture(&mut self, name: &str, width: u32, height: u32) -> TextureHandle {
        TypedHandle::new(self.textures.insert(TextureEntry {
            name: name.to_string(),
            width,
            height,
        }))
    }

    /// The name a texture was registered under
    pub fn texture_name(&self, handle: TextureHandle) -> Option<&str> {
        self.textures.get(handle.key()).map(|entry| entry.name.as_str())
    }

    /// A texture's pixel dimensions
    pub fn texture_size(&self, handle: TextureHandle) -> Option<(u32, u32)> {
        self.textures
            .get(handle.key())
            .map(|entry| (entry.width, entry.height))
    }

    /// Register loaded terrain geometry under a name
    pub fn register_terrain(&mut self, name: &str) -> TerrainHandle {
        TypedHandle::new(self.terrains.insert(name.to_string()))
    }

    /// The name a terrain was registered under
    pub fn terrain_name(&self, handle: TerrainHandle) -> Option<&str> {
        self.terrains.get(handle.key()).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_resolve_back_to_names() {
        let mut catalog = AssetCatalog::new();
        let cube = catalog.register_mesh("Assets/Cube.gpmesh");
        let radar = catalog.register_texture("Assets/Radar.png", 128, 64);

        assert_eq!(catalog.mesh_name(cube), Some("Assets/Cube.gpmesh"));
        assert_eq!(catalog.texture_name(radar), Some("Assets/Radar.png"));
        assert_eq!(catalog.texture_size(radar), Some((128, 64)));
    }

    #[test]
    fn test_missing_resource_is_absent_not_an_error() {
        let mut first = AssetCatalog::new();
        let handle = first.register_mesh("Assets/Sphere.gpmesh");

        let other = AssetCatalog::new();
        assert_eq!(other.mesh_name(handle), None);
    }
}
