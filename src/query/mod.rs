mod fields;
mod filter;
mod order;
mod process;
mod sort_key;

pub use fields::{
    FieldGetter, FieldKind, FieldSet, FieldSpec, FieldValue, Pageable, TIMESTAMP_CANDIDATES,
};
pub use filter::{Filter, FilterSet};
pub use order::Order;
pub use process::{paginate, ItemSource, ItemStream, VecSource};
pub use sort_key::{valid_sort_keys_for, SortKey};
