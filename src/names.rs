//! Display-name registration for matrix keys.
//!
//! A collision matrix only knows keys as integers. Hosts that want UI
//! layers like "Player" or "Projectile" register a name list under a marker
//! type (usually the type that owns the matrix), and lookups retrieve it by
//! that same type.
//!
//! # Example
//!
//! ```
//! use colmat::NameRegistry;
//!
//! struct PhysicsLayers;
//!
//! let mut registry = NameRegistry::new();
//! registry.register::<PhysicsLayers, _>(["Default", "Player", "Projectile"]);
//!
//! let names = registry.names::<PhysicsLayers>().unwrap();
//! assert_eq!(names[1], "Player");
//! ```
//!
//! For hosts that prefer the ambient lookup style there is a process-wide
//! registry behind [`NameRegistry::global`]; see its documentation for the
//! intended lifecycle.

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::any::TypeId;
use std::collections::HashMap;

// parking_lot instead of std::sync so readers never have to deal with
// poisoning on the hot lookup path.
static GLOBAL: Lazy<RwLock<NameRegistry>> = Lazy::new(|| RwLock::new(NameRegistry::new()));

/// Maps a marker type to the display names of its matrix keys.
///
/// Index `i` of a registered list names key `i` of the associated matrix.
/// There is no removal: a registration lives as long as the registry.
#[derive(Debug, Default)]
pub struct NameRegistry {
    names: HashMap<TypeId, Vec<String>>,
}

impl NameRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry.
    ///
    /// Feature owners populate it once during startup; everything after
    /// that is reads. Prefer passing a registry (or the name slice itself)
    /// explicitly where you can; the global exists for hosts whose wiring
    /// has no better seam.
    pub fn global() -> &'static RwLock<NameRegistry> {
        &GLOBAL
    }

    /// Register the key names for marker type `M`.
    ///
    /// # Panics
    ///
    /// Panics when `M` already has names registered; registrations are
    /// write-once.
    pub fn register<M, I>(&mut self, names: I)
    where
        M: 'static,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let type_id = TypeId::of::<M>();
        assert!(
            !self.names.contains_key(&type_id),
            "names for {} are already registered",
            std::any::type_name::<M>()
        );
        self.names
            .insert(type_id, names.into_iter().map(Into::into).collect());
    }

    /// Key names registered for marker type `M`, if any.
    pub fn names<M: 'static>(&self) -> Option<&[String]> {
        self.names.get(&TypeId::of::<M>()).map(Vec::as_slice)
    }

    /// Whether marker type `M` has names registered.
    pub fn contains<M: 'static>(&self) -> bool {
        self.names.contains_key(&TypeId::of::<M>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct LayersA;
    struct LayersB;

    #[test]
    fn test_register_and_lookup() {
        let mut registry = NameRegistry::new();
        registry.register::<LayersA, _>(["One", "Two"]);

        assert!(registry.contains::<LayersA>());
        assert!(!registry.contains::<LayersB>());
        assert_eq!(registry.names::<LayersA>().unwrap(), ["One", "Two"]);
        assert_eq!(registry.names::<LayersB>(), None);
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_double_registration_panics() {
        let mut registry = NameRegistry::new();
        registry.register::<LayersA, _>(["One"]);
        registry.register::<LayersA, _>(["Two"]);
    }

    #[test]
    fn test_global_round_trip() {
        struct GlobalTestLayers;

        NameRegistry::global()
            .write()
            .register::<GlobalTestLayers, _>(["Default"]);
        let registry = NameRegistry::global().read();
        assert_eq!(registry.names::<GlobalTestLayers>().unwrap(), ["Default"]);
    }
}
