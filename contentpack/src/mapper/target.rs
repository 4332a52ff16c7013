//! Objects mappers attach runtime components to.

use std::any::{Any, TypeId};
use std::collections::HashMap;

/// A host object holding at most one component per type.
///
/// Mappers only reach the host object model through this trait.
pub trait ComponentTarget {
    /// Object name, used in logs.
    fn name(&self) -> &str;

    fn component<T: Any>(&self) -> Option<&T>;

    fn component_mut<T: Any>(&mut self) -> Option<&mut T>;

    /// Attach a component, replacing one of the same type.
    fn attach<T: Any>(&mut self, component: T);

    /// Remove the component of type `T`. Returns whether one was present.
    fn detach<T: Any>(&mut self) -> bool;

    /// Return the component of type `T`, creating a default one first if
    /// the target has none.
    fn attach_or_get<T: Any + Default>(&mut self) -> &mut T;

    fn has<T: Any>(&self) -> bool {
        self.component::<T>().is_some()
    }
}

/// In-memory [`ComponentTarget`] keyed by component type.
#[derive(Default)]
pub struct GameObject {
    name: String,
    components: HashMap<TypeId, Box<dyn Any>>,
}

impl GameObject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            components: HashMap::new(),
        }
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }
}

impl std::fmt::Debug for GameObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameObject")
            .field("name", &self.name)
            .field("components", &self.components.len())
            .finish()
    }
}

impl ComponentTarget for GameObject {
    fn name(&self) -> &str {
        &self.name
    }

    fn component<T: Any>(&self) -> Option<&T> {
        self.components
            .get(&TypeId::of::<T>())
            .and_then(|component| component.downcast_ref())
    }

    fn component_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.components
            .get_mut(&TypeId::of::<T>())
            .and_then(|component| component.downcast_mut())
    }

    fn attach<T: Any>(&mut self, component: T) {
        self.components.insert(TypeId::of::<T>(), Box::new(component));
    }

    fn detach<T: Any>(&mut self) -> bool {
        self.components.remove(&TypeId::of::<T>()).is_some()
    }

    fn attach_or_get<T: Any + Default>(&mut self) -> &mut T {
        let slot = self
            .components
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(T::default()));

        // Keys are the TypeId of the boxed value, so this cannot miss.
        match slot.downcast_mut::<T>() {
            Some(component) => component,
            None => unreachable!("component stored under a foreign TypeId"),
        }
    }
}
