use std::pin::Pin;

use log::warn;
use tokio_stream::{Stream, StreamExt};

use crate::envelope::PagedResult;
use crate::error::PageKitError;
use crate::request::PageRequest;

use super::fields::Pageable;
use super::filter::FilterSet;
use super::order::Order;

/// Lazily-evaluated sequence of items produced by an upstream repository.
/// Dropping the stream abandons the fetch, so cancelling a call to
/// [`paginate`] propagates to the collaborator.
pub type ItemStream<'a, T> = Pin<Box<dyn Stream<Item = Result<T, PageKitError>> + Send + 'a>>;

/// Upstream collaborator contract: anything that can supply a not-yet
/// materialized sequence of items. The engine mandates no particular storage
/// technology behind it.
pub trait ItemSource {
    type Item: Pageable + Send + Sync + 'static;

    fn items(&self) -> ItemStream<'_, Self::Item>;
}

/// Trivial in-memory source, useful for tests and for callers that already
/// hold their rows.
#[derive(Debug, Clone)]
pub struct VecSource<T> {
    items: Vec<T>,
}

impl<T> VecSource<T> {
    pub fn new(items: Vec<T>) -> Self {
        VecSource { items }
    }
}

impl<T> ItemSource for VecSource<T>
where
    T: Pageable + Clone + Send + Sync + 'static,
{
    type Item = T;

    fn items(&self) -> ItemStream<'_, T> {
        Box::pin(tokio_stream::iter(
            self.items.iter().cloned().map(Ok::<T, PageKitError>),
        ))
    }
}

/// Runs the full pipeline: clamp paging, build filters, resolve ordering,
/// drain the source counting matches, then sort and slice the requested page.
///
/// Every path terminates in a valid envelope. Construction problems (an
/// unsupported filter or sort clause) degrade silently into diagnostics; only
/// a source failure during materialization produces a failure envelope, and
/// it is caught at this single boundary.
pub async fn paginate<S: ItemSource>(source: &S, req: &PageRequest) -> PagedResult<S::Item> {
    let page_number = req.effective_page_number();
    let page_size = req.effective_page_size();

    // Clause construction is pure and infallible by contract
    let mut filters = FilterSet::<S::Item>::build(req);
    let (order, order_diag) = Order::<S::Item>::resolve(req.order_by, req.descending.unwrap_or(false));

    let mut skipped = filters.take_skipped();
    skipped.extend(order_diag);

    // The single materialization point. Errors from the collaborator are
    // absorbed here; nothing downstream of this loop can fail.
    let mut rows: Vec<S::Item> = Vec::new();
    let mut items = source.items();
    while let Some(next) = items.next().await {
        match next {
            Ok(item) => {
                if filters.matches(&item) {
                    rows.push(item);
                }
            }
            Err(err) => {
                warn!("item source failed during materialization: {err}");
                return PagedResult::failure(page_number, page_size, vec![err.to_string()]);
            }
        }
    }

    // Total reflects all matches, independent of the requested page
    let total = rows.len() as i64;
    if total == 0 {
        return PagedResult::empty(page_number, page_size).with_skipped(skipped);
    }

    if let Some(order) = &order {
        order.apply(&mut rows);
    }

    let skip = (page_number as usize - 1) * page_size as usize;
    let data: Vec<S::Item> = rows.into_iter().skip(skip).take(page_size as usize).collect();

    PagedResult::success(data, page_number, page_size, total).with_skipped(skipped)
}
