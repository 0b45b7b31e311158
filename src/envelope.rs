use serde::Serialize;

pub const MSG_NO_RECORDS: &str = "No records found.";
pub const MSG_FETCH_FAILED: &str = "An error occurred while retrieving the data.";

/// Uniform success/failure wrapper returned by every paged query.
///
/// Serialized camelCase so it can be embedded verbatim in an HTTP response
/// body. An empty result is a success, not an error; consumers must treat
/// `succeeded == false` as a terminal, user-displayable failure.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    pub succeeded: bool,
    pub message: String,
    pub errors: Vec<String>,
    pub data: Vec<T>,
    pub page_number: i32,
    pub page_size: i32,
    pub total: i64,
    pub has_previous: bool,
    pub has_next: bool,
    /// Diagnostic list of requested filter/sort clauses that were silently
    /// dropped because the item type does not support them. Informational
    /// only; absent from the JSON when nothing was skipped.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<String>,
}

impl<T> PagedResult<T> {
    /// Successful page carrying `data`, with paging metadata derived from
    /// the full match count.
    pub fn success(data: Vec<T>, page_number: i32, page_size: i32, total: i64) -> Self {
        PagedResult {
            succeeded: true,
            message: format!("{total} record(s) found."),
            errors: Vec::new(),
            data,
            page_number,
            page_size,
            total,
            has_previous: page_number > 1,
            has_next: (page_number as i64) * (page_size as i64) < total,
            skipped: Vec::new(),
        }
    }

    /// Successful but empty result. Zero matches are displayable, not a failure.
    pub fn empty(page_number: i32, page_size: i32) -> Self {
        PagedResult {
            succeeded: true,
            message: MSG_NO_RECORDS.to_string(),
            errors: Vec::new(),
            data: Vec::new(),
            page_number,
            page_size,
            total: 0,
            has_previous: page_number > 1,
            has_next: false,
            skipped: Vec::new(),
        }
    }

    /// Terminal failure raised when the underlying source errored during
    /// materialization. Carries a generic message plus the raw error text.
    pub fn failure(page_number: i32, page_size: i32, errors: Vec<String>) -> Self {
        PagedResult {
            succeeded: false,
            message: MSG_FETCH_FAILED.to_string(),
            errors,
            data: Vec::new(),
            page_number,
            page_size,
            total: 0,
            has_previous: false,
            has_next: false,
            skipped: Vec::new(),
        }
    }

    pub fn with_skipped(mut self, skipped: Vec<String>) -> Self {
        self.skipped = skipped;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_success_metadata() {
        let page = PagedResult::success(vec![1, 2, 3, 4, 5], 1, 5, 12);
        assert!(page.succeeded);
        assert_eq!(page.message, "12 record(s) found.");
        assert!(!page.has_previous);
        assert!(page.has_next);

        let last = PagedResult::success(vec![11, 12], 3, 5, 12);
        assert!(last.has_previous);
        assert!(!last.has_next);
    }

    #[test]
    fn test_empty_is_a_success() {
        let page: PagedResult<i32> = PagedResult::empty(1, 10);
        assert!(page.succeeded);
        assert_eq!(page.message, MSG_NO_RECORDS);
        assert!(page.data.is_empty());
        assert_eq!(page.total, 0);
        assert!(!page.has_next);
    }

    #[test]
    fn test_failure_carries_error_text() {
        let page: PagedResult<i32> =
            PagedResult::failure(1, 10, vec!["connection reset".to_string()]);
        assert!(!page.succeeded);
        assert_eq!(page.message, MSG_FETCH_FAILED);
        assert_eq!(page.errors, vec!["connection reset".to_string()]);
        assert!(page.data.is_empty());
    }

    #[test]
    fn test_serializes_with_transport_field_names() {
        let page = PagedResult::success(vec!["a"], 2, 1, 3);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["pageNumber"], 2);
        assert_eq!(json["pageSize"], 1);
        assert_eq!(json["total"], 3);
        assert_eq!(json["hasPrevious"], true);
        assert_eq!(json["hasNext"], true);
        // No clauses were skipped, so the diagnostic field is omitted entirely
        assert!(json.get("skipped").is_none());
    }

    #[test]
    fn test_skipped_diagnostics_serialized_when_present() {
        let page = PagedResult::success(vec!["a"], 1, 1, 1)
            .with_skipped(vec!["ordering: no usable sort field".to_string()]);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["skipped"][0], "ordering: no usable sort field");
    }

    proptest! {
        #[test]
        fn prop_paging_metadata_invariants(
            page_number in 1i32..10_000,
            page_size in 1i32..=50,
            total in 0i64..1_000_000,
        ) {
            let page: PagedResult<i32> = PagedResult::success(Vec::new(), page_number, page_size, total);
            prop_assert_eq!(page.has_previous, page_number > 1);
            prop_assert_eq!(page.has_next, (page_number as i64) * (page_size as i64) < total);
            prop_assert!(page.total >= 0);
        }
    }
}
