use std::fmt::Debug;

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use log::debug;

use crate::request::PageRequest;

use super::fields::{FieldSpec, FieldValue, Pageable};

/// Defines the behavior of a row filter. Filters are constructed best-effort
/// from a request; once constructed, matching is infallible.
pub trait Filter<T>: Debug + Send + Sync {
    fn matches(&self, item: &T) -> bool;
}

/// Case-insensitive substring search across every text field of the item.
/// A row matches when at least one non-null text field contains the needle.
pub struct SearchFilter<T: 'static> {
    text_fields: Vec<&'static FieldSpec<T>>,
    needle: String,
}

impl<T> Debug for SearchFilter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchFilter")
            .field("needle", &self.needle)
            .field(
                "fields",
                &self
                    .text_fields
                    .iter()
                    .map(|spec| spec.name)
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl<T: Pageable> SearchFilter<T> {
    /// Returns None when the item type has no text fields; the free-text
    /// filter is then a no-op rather than an empty disjunction that would
    /// exclude everything.
    fn build(needle: &str) -> Option<Self> {
        let text_fields: Vec<_> = T::field_set().text_fields().collect();
        if text_fields.is_empty() {
            return None;
        }

        Some(SearchFilter {
            text_fields,
            needle: needle.to_lowercase(),
        })
    }
}

impl<T: Pageable + Send + Sync> Filter<T> for SearchFilter<T> {
    fn matches(&self, item: &T) -> bool {
        self.text_fields.iter().any(|spec| {
            spec.value(item)
                .as_text()
                .is_some_and(|text| text.to_lowercase().contains(&self.needle))
        })
    }
}

/// Half-open day-granularity range over the item's semantic timestamp field:
/// `start_of(start) <= field < start_of(end) + 1 day`, so the entire end day
/// is included exactly once. A null timestamp never matches.
pub struct DateRangeFilter<T: 'static> {
    field: &'static FieldSpec<T>,
    lower: DateTime<Utc>, // inclusive
    upper: DateTime<Utc>, // exclusive
}

impl<T> Debug for DateRangeFilter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DateRangeFilter")
            .field("field", &self.field.name)
            .field("lower", &self.lower)
            .field("upper", &self.upper)
            .finish()
    }
}

impl<T: Pageable> DateRangeFilter<T> {
    fn build(start_date: NaiveDate, end_date: NaiveDate) -> Result<Self, String> {
        let field = T::field_set()
            .timestamp_field()
            .ok_or("no timestamp field on item type")?;

        let lower = start_date.and_time(NaiveTime::MIN).and_utc();
        let upper = end_date
            .checked_add_days(Days::new(1))
            .ok_or("end date out of range")?
            .and_time(NaiveTime::MIN)
            .and_utc();

        Ok(DateRangeFilter {
            field,
            lower,
            upper,
        })
    }
}

impl<T: Pageable + Send + Sync> Filter<T> for DateRangeFilter<T> {
    fn matches(&self, item: &T) -> bool {
        self.field
            .value(item)
            .as_date()
            .is_some_and(|ts| ts >= self.lower && ts < self.upper)
    }
}

/// Conjunction of the best-effort filters built from one request, along with
/// diagnostics for every requested clause that could not be applied.
#[derive(Debug)]
pub struct FilterSet<T: 'static> {
    filters: Vec<Box<dyn Filter<T>>>,
    skipped: Vec<String>,
}

impl<T: Pageable + Send + Sync> FilterSet<T> {
    /// Builds the free-text and date-range filters the request asks for.
    /// Inapplicable clauses are dropped, never fatal: each drop is recorded
    /// as a diagnostic and logged at debug level.
    pub fn build(req: &PageRequest) -> Self {
        let mut filters: Vec<Box<dyn Filter<T>>> = Vec::new();
        let mut skipped = Vec::new();

        if let Some(term) = req.search_term() {
            match SearchFilter::<T>::build(term) {
                Some(filter) => filters.push(Box::new(filter)),
                None => {
                    let diag = "search: item type has no text fields".to_string();
                    debug!("filter dropped: {diag}");
                    skipped.push(diag);
                }
            }
        }

        match (req.start_date, req.end_date) {
            (Some(start), Some(end)) => match DateRangeFilter::<T>::build(start, end) {
                Ok(filter) => filters.push(Box::new(filter)),
                Err(reason) => {
                    let diag = format!("date range: {reason}");
                    debug!("filter dropped: {diag}");
                    skipped.push(diag);
                }
            },
            (None, None) => {}
            _ => {
                // Only one bound supplied; the range filter needs both
                let diag = "date range: both startDate and endDate are required".to_string();
                debug!("filter dropped: {diag}");
                skipped.push(diag);
            }
        }

        FilterSet { filters, skipped }
    }

    pub fn matches(&self, item: &T) -> bool {
        self.filters.iter().all(|filter| filter.matches(item))
    }

    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    pub fn take_skipped(&mut self) -> Vec<String> {
        std::mem::take(&mut self.skipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::fields::FieldKind;
    use chrono::TimeZone;

    struct Volunteer {
        volunteer_id: i64,
        name: Option<String>,
        city: Option<String>,
        created_date: Option<DateTime<Utc>>,
    }

    impl Pageable for Volunteer {
        fn fields() -> &'static [FieldSpec<Self>] {
            const FIELDS: &[FieldSpec<Volunteer>] = &[
                FieldSpec::new("VolunteerId", FieldKind::Id, |v| {
                    FieldValue::Id(v.volunteer_id)
                }),
                FieldSpec::new("Name", FieldKind::Text, |v| {
                    FieldValue::Text(v.name.as_deref())
                }),
                FieldSpec::new("City", FieldKind::Text, |v| {
                    FieldValue::Text(v.city.as_deref())
                }),
                FieldSpec::new("CreatedDate", FieldKind::Date, |v| {
                    FieldValue::Date(v.created_date)
                }),
            ];
            FIELDS
        }
    }

    struct Tally {
        count: i64,
    }

    impl Pageable for Tally {
        fn fields() -> &'static [FieldSpec<Self>] {
            const FIELDS: &[FieldSpec<Tally>] =
                &[FieldSpec::new("Count", FieldKind::Int, |t| {
                    FieldValue::Int(t.count)
                })];
            FIELDS
        }
    }

    fn volunteer(name: &str, city: Option<&str>, day: u32) -> Volunteer {
        Volunteer {
            volunteer_id: 1,
            name: Some(name.to_string()),
            city: city.map(str::to_string),
            created_date: Some(Utc.with_ymd_and_hms(2024, 1, day, 10, 30, 0).unwrap()),
        }
    }

    fn search_request(text: &str) -> PageRequest {
        PageRequest {
            search_text: Some(text.to_string()),
            ..Default::default()
        }
    }

    fn range_request(start: NaiveDate, end: NaiveDate) -> PageRequest {
        PageRequest {
            start_date: Some(start),
            end_date: Some(end),
            ..Default::default()
        }
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let filters = FilterSet::<Volunteer>::build(&search_request("MAR"));
        assert!(filters.matches(&volunteer("Maria Lopez", None, 5)));
        assert!(!filters.matches(&volunteer("John Smith", None, 5)));
    }

    #[test]
    fn test_search_is_a_disjunction_across_text_fields() {
        let filters = FilterSet::<Volunteer>::build(&search_request("spring"));
        // Matches on City even though Name does not contain the needle
        assert!(filters.matches(&volunteer("Maria", Some("Springfield"), 5)));
        assert!(!filters.matches(&volunteer("Maria", Some("Portland"), 5)));
        // Null text fields never match
        assert!(!filters.matches(&volunteer("Maria", None, 5)));
    }

    #[test]
    fn test_search_skipped_when_no_text_fields() {
        let filters = FilterSet::<Tally>::build(&search_request("anything"));
        // The filter is a no-op, not an exclude-all
        assert!(filters.matches(&Tally { count: 3 }));
        assert_eq!(filters.skipped().len(), 1);
    }

    #[test]
    fn test_date_range_includes_entire_end_day() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let filters = FilterSet::<Volunteer>::build(&range_request(start, end));

        let late_on_end_day = Volunteer {
            created_date: Some(Utc.with_ymd_and_hms(2024, 1, 15, 23, 59, 0).unwrap()),
            ..volunteer("Ana", None, 1)
        };
        assert!(filters.matches(&late_on_end_day));

        let just_past_end = Volunteer {
            created_date: Some(Utc.with_ymd_and_hms(2024, 1, 16, 0, 0, 1).unwrap()),
            ..volunteer("Ana", None, 1)
        };
        assert!(!filters.matches(&just_past_end));
    }

    #[test]
    fn test_date_range_excludes_null_timestamps() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let filters = FilterSet::<Volunteer>::build(&range_request(start, end));

        let missing = Volunteer {
            created_date: None,
            ..volunteer("Ana", None, 1)
        };
        assert!(!filters.matches(&missing));
    }

    #[test]
    fn test_date_range_skipped_when_no_timestamp_field() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let filters = FilterSet::<Tally>::build(&range_request(start, end));
        assert!(filters.matches(&Tally { count: 3 }));
        assert_eq!(filters.skipped().len(), 1);
    }

    #[test]
    fn test_single_bound_is_not_a_range() {
        let req = PageRequest {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            ..Default::default()
        };
        let filters = FilterSet::<Volunteer>::build(&req);
        // Out-of-range rows still pass; the clause was dropped with a diagnostic
        assert!(filters.matches(&volunteer("Ana", None, 1)));
        assert_eq!(filters.skipped().len(), 1);
    }

    #[test]
    fn test_filters_conjoin() {
        let mut req = search_request("maria");
        req.start_date = NaiveDate::from_ymd_opt(2024, 1, 10);
        req.end_date = NaiveDate::from_ymd_opt(2024, 1, 20);
        let filters = FilterSet::<Volunteer>::build(&req);

        assert!(filters.matches(&volunteer("Maria", None, 15)));
        // Name matches but the timestamp is outside the range
        assert!(!filters.matches(&volunteer("Maria", None, 25)));
        // Timestamp in range but the name does not match
        assert!(!filters.matches(&volunteer("John", None, 15)));
    }

    #[test]
    fn test_no_request_clauses_means_no_filters() {
        let filters = FilterSet::<Volunteer>::build(&PageRequest::default());
        assert!(filters.matches(&volunteer("Anyone", None, 1)));
        assert!(filters.skipped().is_empty());
    }
}
