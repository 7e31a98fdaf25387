//! Name-based handles linking an entity to shared render assets.

/// Names the GPU model an entity's [`Mesh`](orbit_core::mesh::Mesh) is uploaded as.
///
/// Entities may share a model name only if they share the mesh.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelHandle {
    pub name: String,
}

/// Names an entry of the [`MaterialCache`](orbit_core::material::MaterialCache).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MaterialHandle {
    pub name: String,
}

/// Names a program of the [`ShaderLibrary`](crate::render::ShaderLibrary).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShaderHandle {
    pub name: String,
}

macro_rules! impl_handle {
    ($($handle:ident),*) => {
        $(
            impl $handle {
                pub fn new(name: impl Into<String>) -> Self {
                    Self { name: name.into() }
                }

                pub fn as_str(&self) -> &str {
                    &self.name
                }
            }

            impl From<&str> for $handle {
                fn from(name: &str) -> Self {
                    Self::new(name)
                }
            }
        )*
    };
}

impl_handle!(ModelHandle, MaterialHandle, ShaderHandle);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construct_and_compare() {
        assert_eq!(MaterialHandle::new("default"), MaterialHandle::from("default"));
        assert_eq!(ShaderHandle::new("default").as_str(), "default");
        assert_ne!(ModelHandle::new("torus"), ModelHandle::new("torus2"));
    }
}
