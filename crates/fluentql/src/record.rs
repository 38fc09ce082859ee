//! Field resolution for host structs.
//!
//! A type opts in to binding and scanning by implementing [`Record`], usually
//! through `#[derive(Record)]`. The derive resolves each field's column name
//! at compile time:
//!
//! 1. `#[orm(column = "...")]`
//! 2. `#[serde(rename = "...")]`
//! 3. the field name, lower-cased
//!
//! An empty name falls through to the next source. `#[orm(skip)]` (or
//! `column = "-"`) keeps a field out of every statement. The identity field
//! is the one marked `#[orm(id)]`, or else the one resolving to `id`.
//!
//! ```ignore
//! #[derive(Default, fluentql::Record)]
//! struct User {
//!     id: u64,
//!     #[orm(column = "user_name")]
//!     name: String,
//!     #[orm(skip)]
//!     cache: Option<String>,
//! }
//! ```

use crate::value::Value;
use heck::ToSnakeCase;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

/// Static description of one struct field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// Rust field name.
    pub field: &'static str,
    /// Resolved column name.
    pub column: &'static str,
    /// Server-generated key, skipped on writes.
    pub identity: bool,
    /// Never bound or scanned.
    pub skip: bool,
}

/// A struct whose fields can be written to and read from rows.
///
/// `read_field` / `write_field` take an index into [`Record::FIELDS`].
pub trait Record {
    const FIELDS: &'static [FieldDef];

    /// Current value of field `idx`. `None` means the field is not bindable.
    fn read_field(&self, idx: usize) -> Option<Value>;

    /// Decode `value` into field `idx`.
    fn write_field(&mut self, idx: usize, value: Value) -> Result<(), String>;

    /// Store a generated key in the identity field. Returns `false` if the
    /// type has no identity field or the key does not fit it.
    fn set_identity(&mut self, id: u64) -> bool;
}

/// Whether a resolved column participates in binding/scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Bound(usize),
    NotBound,
}

/// One resolved slot in a [`FieldMapping`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSlot {
    pub column: &'static str,
    pub normalized: String,
    pub binding: Binding,
    pub identity: bool,
}

/// Include/exclude filter applied on top of a [`FieldMapping`].
///
/// Names are compared after normalisation, so `userName`, `UserName` and
/// `user_name` all match the column `user_name`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldFilter {
    #[default]
    All,
    Only(Vec<String>),
    Exclude(Vec<String>),
}

impl FieldFilter {
    pub fn only<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        FieldFilter::Only(keys.into_iter().map(|k| normalize(k.as_ref())).collect())
    }

    pub fn exclude<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        FieldFilter::Exclude(keys.into_iter().map(|k| normalize(k.as_ref())).collect())
    }

    /// Whether the column `name` passes this filter.
    pub fn keeps(&self, name: &str) -> bool {
        let matches = |keys: &[String]| {
            let name = normalize(name);
            keys.iter().any(|k| normalize(k) == name)
        };
        match self {
            FieldFilter::All => true,
            FieldFilter::Only(keys) => matches(keys),
            FieldFilter::Exclude(keys) => !matches(keys),
        }
    }
}

/// Canonical form used for name matching.
pub fn normalize(name: &str) -> String {
    name.trim().to_snake_case().to_lowercase()
}

/// Column name to field index table for one [`Record`] type.
#[derive(Debug, Clone)]
pub struct FieldMapping {
    slots: Vec<FieldSlot>,
    identity: Option<usize>,
}

type MappingCache = RwLock<HashMap<TypeId, Arc<FieldMapping>>>;

fn cache() -> &'static MappingCache {
    static CACHE: OnceLock<MappingCache> = OnceLock::new();
    CACHE.get_or_init(|| RwLock::new(HashMap::new()))
}

impl FieldMapping {
    /// Mapping for `T`, built on first use and shared afterwards.
    pub fn of<T: Record + 'static>() -> Arc<FieldMapping> {
        let key = TypeId::of::<T>();
        if let Some(found) = cache()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Arc::clone(found);
        }

        let built = Arc::new(Self::from_fields(T::FIELDS));
        let mut guard = cache().write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(guard.entry(key).or_insert(built))
    }

    /// Build a mapping from a field table without caching.
    pub fn from_fields(fields: &[FieldDef]) -> Self {
        let mut identity = None;
        let slots = fields
            .iter()
            .enumerate()
            .map(|(idx, def)| {
                let binding = if def.skip {
                    Binding::NotBound
                } else {
                    Binding::Bound(idx)
                };
                if def.identity && !def.skip && identity.is_none() {
                    identity = Some(idx);
                }
                FieldSlot {
                    column: def.column,
                    normalized: normalize(def.column),
                    binding,
                    identity: def.identity,
                }
            })
            .collect();
        Self { slots, identity }
    }

    pub fn slots(&self) -> &[FieldSlot] {
        &self.slots
    }

    /// Field index of the identity column.
    pub fn identity(&self) -> Option<usize> {
        self.identity
    }

    /// Field index bound to column `name`.
    ///
    /// An exact column match wins; otherwise names are compared normalised.
    pub fn by_name(&self, name: &str) -> Option<usize> {
        let bound = |slot: &FieldSlot| match slot.binding {
            Binding::Bound(idx) => Some(idx),
            Binding::NotBound => None,
        };
        if let Some(slot) = self.slots.iter().find(|s| s.column == name) {
            return bound(slot);
        }
        let wanted = normalize(name);
        self.slots
            .iter()
            .find(|s| s.normalized == wanted)
            .and_then(bound)
    }

    /// Bound slots that pass `filter`, in declaration order.
    pub fn select<'a>(&'a self, filter: &'a FieldFilter) -> impl Iterator<Item = (usize, &'a FieldSlot)> {
        self.slots.iter().filter_map(move |slot| match slot.binding {
            Binding::Bound(idx) if filter.keeps(slot.column) => Some((idx, slot)),
            _ => None,
        })
    }
}
