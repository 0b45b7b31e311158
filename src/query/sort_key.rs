use phf::Map;
use phf_macros::phf_map;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

use super::fields::Pageable;

/// Abstract, entity-independent identifier for "what to sort by".
///
/// Each item type supports the subset of keys whose resolved field actually
/// exists on it; see [`valid_sort_keys_for`].
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    EnumIter,
    IntoStaticStr,
)]
pub enum SortKey {
    #[default]
    Name,
    LastUpdated,
    Created,
    NumericValue,
    EventDate,
    Title,
}

// Keys whose conventional field name differs from the key's own symbolic
// name. Keys absent from this table resolve through their symbolic name,
// which lets new item types support new keys without registry changes.
static SORT_KEY_FIELDS: Map<&'static str, &'static str> = phf_map! {
    "LastUpdated" => "LastModifiedDate",
    "Created" => "CreatedDate",
    "NumericValue" => "Amount",
};

impl SortKey {
    /// Canonical field name this key resolves to on an item type.
    pub fn field_name(&self) -> &'static str {
        let symbolic: &'static str = (*self).into();
        SORT_KEY_FIELDS.get(symbolic).copied().unwrap_or(symbolic)
    }
}

/// Exactly the subset of sort keys whose resolved field exists on `T`,
/// determined from the type's descriptor at the time of the call. Used by
/// metadata endpoints to advertise legal sort options per list; performs no
/// filtering or ordering itself.
pub fn valid_sort_keys_for<T: Pageable + 'static>() -> Vec<SortKey> {
    let fields = T::field_set();
    SortKey::iter()
        .filter(|key| fields.resolve(key.field_name()).is_some())
        .collect()
}
