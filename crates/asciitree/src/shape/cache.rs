//! Cached role locations per record shape.
//!
//! Locating the label, properties, children, and roots members of a record
//! means scanning its shape and every embedded shape. Trees are usually
//! built from one or two record types, so the result is computed once per
//! type and shared afterwards.
//!
//! # Resolution rules
//!
//! - Members are scanned in declaration order.
//! - A member's own tags are candidates at depth 0.
//! - An embedded member contributes the (already resolved) locations of its
//!   shape, one level deeper than they are in that shape.
//! - Per role, the shallowest candidate wins. Two candidates at the same
//!   shallowest depth are a [`TreeError::DuplicateRole`].
//! - An unknown tag value anywhere is a [`TreeError::InvalidTag`].
//!
//! Faults are never cached, so a faulty shape is rescanned (and faults
//! again) on every use.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use log::{debug, trace};
use once_cell::sync::Lazy;

use super::{parse_tags, Role, Shape};
use crate::error::TreeError;

/// Member paths of the four roles within one record shape.
///
/// A path is a list of member indices: a single index for a member of the
/// record itself, longer paths for members promoted from embedded records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleLocations {
    pub label: Option<Vec<usize>>,
    pub properties: Option<Vec<usize>>,
    pub children: Option<Vec<usize>>,
    pub roots: Option<Vec<usize>>,
}

impl RoleLocations {
    /// Returns the member path for `role`, if the shape has one.
    pub fn get(&self, role: Role) -> Option<&[usize]> {
        match role {
            Role::Label => self.label.as_deref(),
            Role::Properties => self.properties.as_deref(),
            Role::Children => self.children.as_deref(),
            Role::Roots => self.roots.as_deref(),
        }
    }

    fn slot(&mut self, role: Role) -> &mut Option<Vec<usize>> {
        match role {
            Role::Label => &mut self.label,
            Role::Properties => &mut self.properties,
            Role::Children => &mut self.children,
            Role::Roots => &mut self.roots,
        }
    }

    /// Returns `true` if no role was found.
    pub fn is_empty(&self) -> bool {
        Role::ALL.iter().all(|role| self.get(*role).is_none())
    }
}

/// Concurrent cache of [`RoleLocations`] keyed by record type.
///
/// Lookups share a read lock. A missing entry is computed without holding
/// any lock and then published under the write lock; if another thread
/// published first, its entry is kept and returned, so every caller sees
/// the same `Arc` for a type.
#[derive(Debug, Default)]
pub struct ShapeCache {
    entries: RwLock<HashMap<TypeId, Arc<RoleLocations>>>,
}

impl ShapeCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the role locations of `shape`, scanning it on first use.
    pub fn locate(&self, shape: &'static Shape) -> Result<Arc<RoleLocations>, TreeError> {
        let key = shape.id();
        if let Some(found) = self.read_entry(&key) {
            trace!("shape cache hit for {}", shape.type_name);
            return Ok(found);
        }

        let scanned = Arc::new(self.scan(shape)?);

        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let published = entries.entry(key).or_insert(scanned);
        debug!(
            "located roles of {}: label={:?} properties={:?} children={:?} roots={:?}",
            shape.type_name,
            published.label,
            published.properties,
            published.children,
            published.roots
        );
        Ok(Arc::clone(published))
    }

    /// Number of cached shapes.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if no shape has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forgets every cached shape.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn read_entry(&self, key: &TypeId) -> Option<Arc<RoleLocations>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn scan(&self, shape: &'static Shape) -> Result<RoleLocations, TreeError> {
        let mut found = RoleLocations::default();

        for (index, field) in shape.fields.iter().enumerate() {
            if let Some(embedded) = field.embed {
                let inner = self.locate(embedded)?;
                for role in Role::ALL {
                    if let Some(inner_path) = inner.get(role) {
                        let mut path = Vec::with_capacity(inner_path.len() + 1);
                        path.push(index);
                        path.extend_from_slice(inner_path);
                        claim(&mut found, role, path, shape)?;
                    }
                }
            }

            let roles = parse_tags(field.tags).map_err(|tags| TreeError::InvalidTag {
                tags,
                field: field.name,
                type_name: shape.type_name,
            })?;
            for role in roles {
                claim(&mut found, role, vec![index], shape)?;
            }
        }

        Ok(found)
    }
}

/// Records `path` as a candidate for `role`, keeping the shallowest one.
fn claim(
    found: &mut RoleLocations,
    role: Role,
    path: Vec<usize>,
    shape: &Shape,
) -> Result<(), TreeError> {
    let slot = found.slot(role);
    match slot.as_ref().map(Vec::len) {
        Some(depth) if depth < path.len() => Ok(()),
        Some(depth) if depth == path.len() => Err(TreeError::DuplicateRole {
            role,
            type_name: shape.type_name,
        }),
        _ => {
            *slot = Some(path);
            Ok(())
        }
    }
}

static SHAPE_CACHE: Lazy<ShapeCache> = Lazy::new(ShapeCache::new);

/// Returns the role locations of `shape` from the process-wide cache.
pub fn locate_roles(shape: &'static Shape) -> Result<Arc<RoleLocations>, TreeError> {
    SHAPE_CACHE.locate(shape)
}

/// Empties the process-wide shape cache.
///
/// Never needed in normal operation; useful for tests that count scans or
/// compare cache identities.
pub fn reset_shape_cache() {
    SHAPE_CACHE.clear();
}
