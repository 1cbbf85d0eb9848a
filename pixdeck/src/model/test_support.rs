//! Record builders and an in-memory image source shared by the tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use stockr::{Author, ImageRecord, ImageSource, ImageUrls, ProviderResult};

pub fn record(id: &str, width: u32, height: u32) -> ImageRecord {
    let url = format!("https://images.example/{id}");
    ImageRecord {
        id: id.to_string(),
        alt_description: format!("image {id}"),
        urls: ImageUrls {
            raw: format!("{url}?raw"),
            full: format!("{url}?full"),
            regular: format!("{url}?regular"),
            small: format!("{url}?small"),
            thumb: format!("{url}?thumb"),
        },
        width,
        height,
        user: Author {
            name: "Dorothea Lange".into(),
            username: "dlange".into(),
        },
        html_link: Some(format!("https://unsplash.com/photos/{id}")),
    }
}

/// `count` square records with ids `{prefix}-0`, `{prefix}-1`, ...
pub fn records(prefix: &str, count: usize) -> Vec<ImageRecord> {
    (0..count)
        .map(|i| record(&format!("{prefix}-{i}"), 1000, 1000))
        .collect()
}

/// In-memory image source with scripted page responses.
#[derive(Default)]
pub struct FakeSource {
    by_query: Mutex<HashMap<String, VecDeque<ProviderResult<Vec<ImageRecord>>>>>,
    fallback: Mutex<VecDeque<ProviderResult<Vec<ImageRecord>>>>,
    calls: Mutex<Vec<(String, u32)>>,
}

impl FakeSource {
    /// Responses handed out in call order; once they run out every page is empty
    pub fn with_pages(pages: Vec<ProviderResult<Vec<ImageRecord>>>) -> Self {
        Self {
            fallback: Mutex::new(pages.into()),
            ..Self::default()
        }
    }

    /// Queue a response for one query, consumed before the shared queue
    pub fn page(self, query: &str, result: ProviderResult<Vec<ImageRecord>>) -> Self {
        self.by_query
            .lock()
            .unwrap()
            .entry(query.to_string())
            .or_default()
            .push_back(result);
        self
    }

    /// `(query, page)` for every fetch so far
    pub fn calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageSource for FakeSource {
    async fn fetch_page(
        &self,
        query: &str,
        page: u32,
        _per_page: u32,
    ) -> ProviderResult<Vec<ImageRecord>> {
        self.calls.lock().unwrap().push((query.to_string(), page));

        let scripted = self
            .by_query
            .lock()
            .unwrap()
            .get_mut(query)
            .and_then(VecDeque::pop_front);
        scripted
            .or_else(|| self.fallback.lock().unwrap().pop_front())
            .unwrap_or(Ok(Vec::new()))
    }

    async fn categories(&self) -> ProviderResult<Vec<String>> {
        Ok(stockr::categories())
    }

    async fn suggestions(&self, query: &str) -> ProviderResult<Vec<String>> {
        Ok(stockr::suggest(query))
    }
}
