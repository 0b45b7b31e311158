//! pagekit is a generic query-composition engine for list endpoints: it
//! takes an abstract, not-yet-materialized sequence of items of any record
//! type plus a declarative pagination/filter/sort request and produces a
//! uniformly shaped paged result.
//!
//! Item types describe themselves through a static capability descriptor
//! ([`Pageable`]) instead of run-time reflection. Filter and sort clauses
//! that an item type cannot support are dropped silently; a list request
//! never fails because of an unsupported clause. The only fallible step is
//! pulling rows from the upstream [`ItemSource`], and that failure is
//! absorbed into the result envelope.
//!
//! ```
//! use pagekit::{paginate, FieldKind, FieldSpec, FieldValue, PageRequest, Pageable, VecSource};
//!
//! #[derive(Clone)]
//! struct Category {
//!     category_id: i64,
//!     name: Option<String>,
//! }
//!
//! impl Pageable for Category {
//!     fn fields() -> &'static [FieldSpec<Self>] {
//!         const FIELDS: &[FieldSpec<Category>] = &[
//!             FieldSpec::new("CategoryId", FieldKind::Id, |c| FieldValue::Id(c.category_id)),
//!             FieldSpec::new("Name", FieldKind::Text, |c| FieldValue::Text(c.name.as_deref())),
//!         ];
//!         FIELDS
//!     }
//! }
//!
//! let source = VecSource::new(vec![
//!     Category { category_id: 1, name: Some("Education".to_string()) },
//!     Category { category_id: 2, name: Some("Health".to_string()) },
//! ]);
//!
//! let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! let page = rt.block_on(paginate(&source, &PageRequest::default()));
//! assert!(page.succeeded);
//! assert_eq!(page.total, 2);
//! ```

pub mod envelope;
pub mod error;
pub mod query;
pub mod request;

pub use envelope::PagedResult;
pub use error::PageKitError;
pub use query::{
    paginate, valid_sort_keys_for, FieldKind, FieldSet, FieldSpec, FieldValue, ItemSource,
    ItemStream, Pageable, SortKey, VecSource,
};
pub use request::{PageRequest, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, MIN_PAGE_SIZE};
