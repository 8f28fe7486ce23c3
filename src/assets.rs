//! Loaded-asset lookup.
//!
//! Decoding models, textures and navmesh data happens elsewhere; the
//! simulation only asks for handles by name. Unknown names are logged and
//! answered with a debug placeholder so a missing file never stops the game.

use crate::navmesh::NavMesh;
use std::cell::Cell;
use std::collections::HashSet;

/// Size of the fallback floor when no navmesh was loaded (matches the 200x200 debug plane)
const DEBUG_FLOOR_HALF_EXTENT: f32 = 100.0;

/// One instance of a model in the scene
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelHandle {
    name: String,
    instance: u32,
    placeholder: bool,
}

impl ModelHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn instance(&self) -> u32 {
        self.instance
    }

    /// True if this stands in for a model that was never loaded
    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextureHandle {
    name: String,
    placeholder: bool,
}

impl TextureHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }
}

pub trait AssetProvider {
    /// A fresh instance of the named model, or a debug sphere
    fn get_model(&self, name: &str) -> ModelHandle;
    /// The named texture, or a debug texture
    fn get_texture(&self, name: &str) -> TextureHandle;
    /// The level's navigation mesh, or a flat debug floor
    fn get_nav_mesh(&self) -> NavMesh;
}

/// In-memory registry of what the loader finished loading
#[derive(Debug, Default)]
pub struct AssetLibrary {
    models: HashSet<String>,
    textures: HashSet<String>,
    nav_mesh: Option<NavMesh>,
    next_instance: Cell<u32>,
}

impl AssetLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything the prototype level ships with, on a flat floor
    pub fn prototype_level() -> Self {
        let mut library = Self::new();
        for model in ["pistol", "rifle", "zombie-01"] {
            library.add_model(model);
        }
        for texture in ["weapon-skin", "bullet-hole", "hdri"] {
            library.add_texture(texture);
        }
        library.set_nav_mesh(NavMesh::debug_floor(DEBUG_FLOOR_HALF_EXTENT));
        library
    }

    pub fn add_model(&mut self, name: &str) {
        self.models.insert(name.to_string());
    }

    pub fn add_texture(&mut self, name: &str) {
        self.textures.insert(name.to_string());
    }

    pub fn set_nav_mesh(&mut self, nav_mesh: NavMesh) {
        self.nav_mesh = Some(nav_mesh);
    }

    fn next_instance(&self) -> u32 {
        let id = self.next_instance.get();
        self.next_instance.set(id + 1);
        id
    }
}

impl AssetProvider for AssetLibrary {
    fn get_model(&self, name: &str) -> ModelHandle {
        let placeholder = !self.models.contains(name);
        if placeholder {
            log::error!("Could not find model {}, returning debug object instead", name);
        }
        ModelHandle {
            name: name.to_string(),
            instance: self.next_instance(),
            placeholder,
        }
    }

    fn get_texture(&self, name: &str) -> TextureHandle {
        let placeholder = !self.textures.contains(name);
        if placeholder {
            log::error!("Could not find texture {}, returning debug texture instead", name);
        }
        TextureHandle {
            name: name.to_string(),
            placeholder,
        }
    }

    fn get_nav_mesh(&self) -> NavMesh {
        match &self.nav_mesh {
            Some(mesh) => mesh.clone(),
            None => {
                log::error!("No navmesh loaded, returning debug floor instead");
                NavMesh::debug_floor(DEBUG_FLOOR_HALF_EXTENT)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_model_instances_are_distinct() {
        let assets = AssetLibrary::prototype_level();
        let a = assets.get_model("zombie-01");
        let b = assets.get_model("zombie-01");
        assert!(!a.is_placeholder());
        assert_eq!(a.name(), b.name());
        assert_ne!(a, b);
    }

    #[test]
    fn test_unknown_names_give_placeholders() {
        let assets = AssetLibrary::new();
        assert!(assets.get_model("bandit").is_placeholder());
        assert!(assets.get_texture("bandit").is_placeholder());
        assert_eq!(assets.get_nav_mesh().regions().len(), 1);
    }
}
