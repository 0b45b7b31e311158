use std::fmt;

use log::debug;

use super::fields::{FieldSpec, Pageable};
use super::sort_key::SortKey;

/// A resolved ordering over one item type: a concrete field plus direction.
///
/// Resolution is best-effort. When the requested key's field is absent the
/// builder falls back to the identity field, then the first declared field;
/// when nothing usable exists the sequence is left in input order.
pub struct Order<T: 'static> {
    field: &'static FieldSpec<T>,
    descending: bool,
}

impl<T> fmt::Debug for Order<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Order")
            .field("field", &self.field.name)
            .field("descending", &self.descending)
            .finish()
    }
}

impl<T: Pageable> Order<T> {
    /// Resolves `key` against `T`'s descriptor. Returns the ordering (if one
    /// could be determined) and a diagnostic when the requested field had to
    /// be substituted or abandoned.
    pub fn resolve(key: SortKey, descending: bool) -> (Option<Self>, Option<String>) {
        let fields = T::field_set();
        let wanted = key.field_name();

        if let Some(field) = fields.resolve(wanted) {
            return (Some(Order { field, descending }), None);
        }

        let fallback = fields.identity_field().or_else(|| fields.first_field());
        match fallback {
            Some(field) => {
                let diag = format!(
                    "ordering: sort key {key:?} ({wanted}) not supported; ordered by {} instead",
                    field.name
                );
                debug!("{diag}");
                (Some(Order { field, descending }), Some(diag))
            }
            None => {
                let diag = format!("ordering: sort key {key:?} ({wanted}) not supported");
                debug!("{diag} and no fallback field exists");
                (None, Some(diag))
            }
        }
    }

    pub fn field_name(&self) -> &'static str {
        self.field.name
    }

    /// Sorts in place on the resolved field's run-time value. The sort is
    /// stable, so rows that compare equal keep their input order and a fixed
    /// input always produces an identical page.
    pub fn apply(&self, rows: &mut [T]) {
        rows.sort_by(|a, b| {
            let ordering = self.field.value(a).compare(&self.field.value(b));
            if self.descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
    }
}
