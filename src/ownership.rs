//! Display-scoped identity registries.
//!
//! Every surface and menu owned by a display carries a small integer identity
//! that is unique within that display. Surface identity `-1` is reserved for
//! the desktop root and never stored as a map entry; lookups of `-1` resolve
//! to whatever desktop the display currently has.

use std::collections::HashMap;

use slotmap::new_key_type;

use crate::error::{DisplayError, Result};

new_key_type! {
    /// Arena index of a surface. Stays valid after the surface is destroyed.
    pub struct SurfaceKey;
    pub struct MenuKey;
    pub struct DisplayKey;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(i64);

impl SurfaceId {
    pub const DESKTOP: SurfaceId = SurfaceId(-1);

    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MenuId(i64);

impl MenuId {
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

/// Integer identity to entity map with registration-time validation.
#[derive(Debug, Clone)]
pub struct IdMap<K: Copy> {
    entries: HashMap<i64, K>,
}

impl<K: Copy> Default for IdMap<K> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K: Copy> IdMap<K> {
    /// Validate that `id` could be registered right now.
    pub fn check(&self, id: i64) -> Result<()> {
        if id == 0 {
            return Err(DisplayError::InvalidIdentity {
                id,
                reason: "zero is not a valid identity",
            });
        }
        if id < -1 {
            return Err(DisplayError::InvalidIdentity {
                id,
                reason: "below the desktop identity",
            });
        }
        if id == -1 {
            return Err(DisplayError::InvalidIdentity {
                id,
                reason: "reserved for the desktop",
            });
        }
        if self.entries.contains_key(&id) {
            return Err(DisplayError::IdentityConflict(id));
        }
        Ok(())
    }

    pub fn add(&mut self, id: i64, value: K) -> Result<()> {
        self.check(id)?;
        self.entries.insert(id, value);
        Ok(())
    }

    pub fn get(&self, id: i64) -> Option<K> {
        self.entries.get(&id).copied()
    }

    pub fn contains(&self, id: i64) -> bool {
        self.entries.contains_key(&id)
    }

    /// Removing an unknown identity is a no-op.
    pub fn remove(&mut self, id: i64) -> Option<K> {
        self.entries.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.entries.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Smallest positive identity larger than every registered one.
    pub fn next_free(&self) -> i64 {
        self.entries.keys().copied().max().unwrap_or(0).max(0) + 1
    }
}

/// A named output with its own identity namespaces and at most one desktop.
#[derive(Debug, Clone)]
pub struct Display {
    name: String,
    surfaces: IdMap<SurfaceKey>,
    menus: IdMap<MenuKey>,
    desktop: Option<SurfaceKey>,
}

impl Display {
    pub(crate) fn new(name: &str) -> Result<Self> {
        if name.is_empty() || name.contains(' ') {
            return Err(DisplayError::InvalidState("invalid display name"));
        }
        Ok(Self {
            name: name.to_string(),
            surfaces: IdMap::default(),
            menus: IdMap::default(),
            desktop: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn desktop(&self) -> Option<SurfaceKey> {
        self.desktop
    }

    pub fn surfaces(&self) -> &IdMap<SurfaceKey> {
        &self.surfaces
    }

    pub fn menus(&self) -> &IdMap<MenuKey> {
        &self.menus
    }

    /// Resolve a surface identity; `-1` always means the current desktop.
    pub fn surface(&self, id: SurfaceId) -> Option<SurfaceKey> {
        if id == SurfaceId::DESKTOP {
            return self.desktop;
        }
        self.surfaces.get(id.get())
    }

    pub fn menu(&self, id: MenuId) -> Option<MenuKey> {
        self.menus.get(id.get())
    }

    pub(crate) fn check_surface(&self, id: SurfaceId, desktop: bool) -> Result<()> {
        if !desktop {
            return self.surfaces.check(id.get());
        }
        if id != SurfaceId::DESKTOP {
            return Err(DisplayError::InvalidIdentity {
                id: id.get(),
                reason: "a desktop must use the desktop identity",
            });
        }
        if self.desktop.is_some() {
            return Err(DisplayError::InvalidIdentity {
                id: id.get(),
                reason: "the display already has a desktop",
            });
        }
        Ok(())
    }

    /// Caller must have run `check_surface` for the same arguments.
    pub(crate) fn register_surface(&mut self, id: SurfaceId, key: SurfaceKey, desktop: bool) {
        if desktop {
            self.desktop = Some(key);
        } else {
            self.surfaces.entries.insert(id.get(), key);
        }
    }

    pub(crate) fn unregister_surface(&mut self, id: SurfaceId, key: SurfaceKey) {
        if id == SurfaceId::DESKTOP {
            if self.desktop == Some(key) {
                self.desktop = None;
            }
            return;
        }
        if self.surfaces.get(id.get()) == Some(key) {
            self.surfaces.remove(id.get());
        }
    }

    pub(crate) fn menus_mut(&mut self) -> &mut IdMap<MenuKey> {
        &mut self.menus
    }
}
