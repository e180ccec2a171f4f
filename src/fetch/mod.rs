//! Page fetching module
//!
//! One request per page attempt, classified into a [`PageResult`]:
//! records, empty, malformed, or transport failure.

mod fetcher;
mod types;

pub use fetcher::{
    classify_page, item_endpoint, PageFetcher, ReviewPageFetcher, PAGE_PARAM, REVIEW_HEADERS,
};
pub use types::{PageRequest, PageResult, RawReview};

#[cfg(test)]
pub(crate) mod testing;
