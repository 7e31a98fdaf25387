//! Materials and the name-keyed material cache.

mod types;

use std::collections::HashMap;

pub use types::Material;

/// Name of the material every scene can rely on.
pub const DEFAULT_MATERIAL: &str = "default";

/// Materials stored by name.
///
/// Adding a name that already exists overwrites its fields in place.
#[derive(Debug, Clone, Default)]
pub struct MaterialCache {
    materials: HashMap<String, Material>,
}

impl MaterialCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or overwrite a material and return the stored value.
    pub fn add(&mut self, name: impl Into<String>, material: Material) -> &mut Material {
        let name = name.into();
        log::debug!("Material '{}' registered", name);
        self.materials
            .entry(name)
            .and_modify(|slot| *slot = material)
            .or_insert(material)
    }

    pub fn get(&self, name: &str) -> Option<&Material> {
        self.materials.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Material> {
        self.materials.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.materials.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Material> {
        self.materials.remove(name)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Registered names in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.materials.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn add_and_get() {
        let mut cache = MaterialCache::new();
        assert!(cache.is_empty());
        cache.add(DEFAULT_MATERIAL, Material::default());
        assert!(cache.contains(DEFAULT_MATERIAL));
        assert_eq!(cache.get(DEFAULT_MATERIAL), Some(&Material::default()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn re_adding_name_overwrites_fields() {
        let mut cache = MaterialCache::new();
        cache.add("TESTTorus", Material::grey(0.1, 0.4, 0.9, 180.0));
        let red = Material::new(
            Vec3::new(0.1, 0.0, 0.0),
            Vec3::new(0.4, 0.0, 0.0),
            Vec3::new(0.9, 0.0, 0.0),
            180.0,
        );
        let stored = cache.add("TESTTorus", red);
        assert_eq!(*stored, red);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("TESTTorus"), Some(&red));
    }

    #[test]
    fn get_mut_edits_in_place() {
        let mut cache = MaterialCache::new();
        cache.add("floor", Material::default());
        if let Some(m) = cache.get_mut("floor") {
            m.shininess = 8.0;
        }
        assert_eq!(cache.get("floor").map(|m| m.shininess), Some(8.0));
    }

    #[test]
    fn remove_and_names() {
        let mut cache = MaterialCache::new();
        cache.add("a", Material::default());
        cache.add("b", Material::default().with_shininess(2.0));
        let mut names: Vec<_> = cache.names().collect();
        names.sort_unstable();
        assert_eq!(names, vec!["a", "b"]);

        assert!(cache.remove("a").is_some());
        assert!(cache.get("a").is_none());
        assert!(cache.remove("a").is_none());
    }

    #[test]
    fn builders() {
        let m = Material::default()
            .with_ambient(Vec3::X)
            .with_diffuse(Vec3::Y)
            .with_specular(Vec3::Z)
            .with_shininess(3.0);
        assert_eq!(m, Material::new(Vec3::X, Vec3::Y, Vec3::Z, 3.0));
    }
}
