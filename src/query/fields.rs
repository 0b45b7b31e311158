use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};

/// Default priority order for locating an item type's semantic timestamp
/// field. The first name that resolves to a date-kind field wins. Item types
/// with unconventional naming override [`Pageable::timestamp_candidates`].
pub const TIMESTAMP_CANDIDATES: &[&str] =
    &["CreatedDate", "Created", "EventDate", "Date", "TransactionDate"];

/// Logical kind of a descriptor field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Id,
    Text,
    Date,
    Int,
    Float,
    Bool,
}

/// Run-time value surfaced by a field accessor.
///
/// Text and Date carry `Option` because those are the fields that are
/// nullable in practice (free-text columns, optional timestamps). A null
/// never matches a filter and sorts before every non-null value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Id(i64),
    Text(Option<&'a str>),
    Date(Option<DateTime<Utc>>),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl FieldValue<'_> {
    /// Total ordering over values of the same variant. Values of different
    /// variants compare equal; a single field always yields a single variant,
    /// so that case only arises from a malformed descriptor and must not
    /// panic.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (FieldValue::Id(a), FieldValue::Id(b)) => a.cmp(b),
            (FieldValue::Text(a), FieldValue::Text(b)) => match (a, b) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (Some(a), Some(b)) => {
                    // Case-insensitive, with a raw tie-break to keep the
                    // ordering deterministic
                    let folded = a.to_lowercase().cmp(&b.to_lowercase());
                    match folded {
                        Ordering::Equal => a.cmp(b),
                        _ => folded,
                    }
                }
            },
            (FieldValue::Date(a), FieldValue::Date(b)) => a.cmp(b),
            (FieldValue::Int(a), FieldValue::Int(b)) => a.cmp(b),
            // total_cmp keeps the comparator consistent even when a field
            // yields NaN; sort_by may panic on an inconsistent comparator
            (FieldValue::Float(a), FieldValue::Float(b)) => a.total_cmp(b),
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => *text,
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::Date(date) => *date,
            _ => None,
        }
    }
}

/// Typed accessor reading one logical field off an item.
pub type FieldGetter<T> = for<'a> fn(&'a T) -> FieldValue<'a>;

/// One entry of an item type's capability descriptor: a logical field name,
/// its kind, and a typed accessor. Field names use the platform's
/// conventional casing (`DonorName`, `CreatedDate`) and are resolved
/// case-insensitively.
pub struct FieldSpec<T> {
    pub name: &'static str,
    pub kind: FieldKind,
    pub get: FieldGetter<T>,
}

impl<T> FieldSpec<T> {
    pub const fn new(name: &'static str, kind: FieldKind, get: FieldGetter<T>) -> Self {
        FieldSpec { name, kind, get }
    }

    pub fn value<'a>(&self, item: &'a T) -> FieldValue<'a> {
        (self.get)(item)
    }
}

// Manual impls to avoid bounding T; the struct itself only holds a fn pointer
impl<T> Clone for FieldSpec<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FieldSpec<T> {}

impl<T> fmt::Debug for FieldSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish()
    }
}

/// An item type that can be paged, filtered, and sorted by the engine.
///
/// The descriptor returned by [`Pageable::fields`] is the statically-typed
/// stand-in for run-time field introspection: one generic engine, many
/// entity-specific descriptors.
pub trait Pageable: Sized {
    /// The item type's fields, in declaration order.
    fn fields() -> &'static [FieldSpec<Self>];

    /// Candidate names, in priority order, for the field that represents
    /// "when did this record happen" for date-range filtering.
    fn timestamp_candidates() -> &'static [&'static str] {
        TIMESTAMP_CANDIDATES
    }

    fn field_set() -> FieldSet<Self> {
        FieldSet::new(Self::fields(), Self::timestamp_candidates())
    }
}

/// Resolution helper over an item type's descriptor.
pub struct FieldSet<T: 'static> {
    fields: &'static [FieldSpec<T>],
    timestamp_candidates: &'static [&'static str],
}

impl<T> Clone for FieldSet<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FieldSet<T> {}

impl<T> fmt::Debug for FieldSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSet").field("fields", &self.fields).finish()
    }
}

impl<T> FieldSet<T> {
    pub fn new(
        fields: &'static [FieldSpec<T>],
        timestamp_candidates: &'static [&'static str],
    ) -> Self {
        FieldSet {
            fields,
            timestamp_candidates,
        }
    }

    pub fn fields(&self) -> &'static [FieldSpec<T>] {
        self.fields
    }

    /// Case-insensitive lookup by logical field name.
    pub fn resolve(&self, name: &str) -> Option<&'static FieldSpec<T>> {
        self.fields
            .iter()
            .find(|spec| spec.name.eq_ignore_ascii_case(name))
    }

    /// All text-kind fields, in declaration order.
    pub fn text_fields(&self) -> impl Iterator<Item = &'static FieldSpec<T>> {
        self.fields
            .iter()
            .filter(|spec| spec.kind == FieldKind::Text)
    }

    /// First candidate name that resolves to a date-kind field, if any.
    pub fn timestamp_field(&self) -> Option<&'static FieldSpec<T>> {
        self.timestamp_candidates
            .iter()
            .filter_map(|name| self.resolve(name))
            .find(|spec| spec.kind == FieldKind::Date)
    }

    /// The item's identity field, used as the first ordering fallback.
    pub fn identity_field(&self) -> Option<&'static FieldSpec<T>> {
        self.fields.iter().find(|spec| spec.kind == FieldKind::Id)
    }

    /// First declared field, used as the last ordering fallback.
    pub fn first_field(&self) -> Option<&'static FieldSpec<T>> {
        self.fields.first()
    }
}
