//! Scripted in-memory fetcher for state machine tests

use super::{PageFetcher, PageRequest, PageResult, RawReview};
use crate::error::Error;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// What a scripted page attempt returns
#[derive(Debug, Clone)]
pub enum Scripted {
    /// `count` reviews tagged with the page number, and an optional total
    Records(usize, Option<u32>),
    Empty,
    Malformed,
    Fail,
}

/// Replays a fixed script of outcomes per page and counts attempts.
///
/// Each page has a queue; the last entry repeats once the queue is drained.
/// Pages without a script return `Empty`.
#[derive(Debug, Default)]
pub struct ScriptedFetcher {
    script: Mutex<HashMap<u32, VecDeque<Scripted>>>,
    attempts: Mutex<HashMap<u32, u32>>,
    order: Mutex<Vec<PageRequest>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn page(self, page: u32, outcomes: impl IntoIterator<Item = Scripted>) -> Self {
        self.script
            .lock()
            .unwrap()
            .insert(page, outcomes.into_iter().collect());
        self
    }

    pub fn attempts(&self, page: u32) -> u32 {
        self.attempts.lock().unwrap().get(&page).copied().unwrap_or(0)
    }

    pub fn total_attempts(&self) -> u32 {
        self.attempts.lock().unwrap().values().sum()
    }

    pub fn requests(&self) -> Vec<PageRequest> {
        self.order.lock().unwrap().clone()
    }
}

/// Review whose author encodes its page and position
pub fn review(page: u32, index: usize) -> RawReview {
    RawReview {
        user_name: Some(format!("user-{page}-{index}")),
        created_at: Some(format!("2024-01-{:02}", (index % 28) + 1)),
        body: Some(format!("review {index} on page {page}")),
        rate: Some(((index % 5) + 1) as f64),
        is_buyer: Some(index % 2 == 0),
        recommendation_status: Some("recommended".to_string()),
    }
}

#[async_trait]
impl PageFetcher for ScriptedFetcher {
    async fn fetch(&self, request: &PageRequest) -> PageResult {
        let page = request.page_index;
        *self.attempts.lock().unwrap().entry(page).or_insert(0) += 1;
        self.order.lock().unwrap().push(*request);

        let next = {
            let mut script = self.script.lock().unwrap();
            match script.get_mut(&page) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };

        match next {
            Some(Scripted::Records(count, total)) => PageResult::Records {
                items: (0..count).map(|i| review(page, i)).collect(),
                declared_total_pages: total,
            },
            Some(Scripted::Malformed) => PageResult::Malformed("scripted".to_string()),
            Some(Scripted::Fail) => PageResult::TransportFailure(Error::http_status(503, "")),
            Some(Scripted::Empty) | None => PageResult::Empty,
        }
    }
}
