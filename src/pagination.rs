// Copyright (c) 2023 Lithic (lithic.com)
// This file is part of the Lithic Rust client.

// This program is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
// You should have received a copy of the GNU General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.

use crate::client::{Client, RequestOptions};
use crate::error::Result;
use crate::query::QueryPairs;
use futures::stream::{self, Stream};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{event, Level};

/// One page of a list endpoint.
///
/// Pages remember the request that produced them, so the following page can be fetched with
/// [Page::next_page], or every remaining item visited with [Page::into_stream].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub page: i64,
    #[serde(default)]
    pub total_entries: i64,
    #[serde(default)]
    pub total_pages: i64,
    #[serde(skip)]
    request: Option<PageRequest>,
}

#[derive(Clone, Debug)]
struct PageRequest {
    client: Client,
    path: String,
    query: QueryPairs,
    options: RequestOptions,
}

impl<T: DeserializeOwned> Page<T> {
    pub(crate) async fn fetch(
        client: Client,
        path: String,
        query: QueryPairs,
        options: RequestOptions,
    ) -> Result<Self> {
        let mut page: Page<T> = client.get(&path, &query, &options).await?;
        event!(
            Level::DEBUG,
            "fetched page {} of {} from {}",
            page.page,
            page.total_pages,
            path
        );
        page.request = Some(PageRequest {
            client,
            path,
            query,
            options,
        });
        Ok(page)
    }

    pub fn has_next_page(&self) -> bool {
        self.request.is_some() && self.page < self.total_pages
    }

    /// Fetch the page after this one, or `None` if this is the last page.
    pub async fn next_page(&self) -> Result<Option<Self>> {
        let request = match &self.request {
            Some(request) if self.has_next_page() => request,
            _ => return Ok(None),
        };
        let mut query = request.query.clone();
        query.set("page", (self.page + 1).to_string());
        let next = Page::fetch(
            request.client.clone(),
            request.path.clone(),
            query,
            request.options.clone(),
        )
        .await?;
        Ok(Some(next))
    }

    /// Every item on this page and all following pages.
    ///
    /// Pages are fetched lazily as the stream is consumed. A failed fetch yields one error and
    /// ends the stream.
    pub fn into_stream(mut self) -> impl Stream<Item = Result<T>> {
        let items = std::mem::take(&mut self.data).into_iter();
        stream::unfold(
            (items, Some(self)),
            |(mut items, mut page)| async move {
                loop {
                    if let Some(item) = items.next() {
                        return Some((Ok(item), (items, page)));
                    }
                    let current = page.take()?;
                    match current.next_page().await {
                        Ok(Some(mut next)) => {
                            items = std::mem::take(&mut next.data).into_iter();
                            page = Some(next);
                        }
                        Ok(None) => return None,
                        Err(err) => return Some((Err(err), (items, None))),
                    }
                }
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decoded_pages_without_request_have_no_next_page() {
        let page: Page<String> = serde_json::from_value(json!({
            "data": ["a", "b"],
            "page": 1,
            "total_entries": 4,
            "total_pages": 2,
        }))
        .unwrap();
        assert_eq!(page.data, vec!["a", "b"]);
        assert!(!page.has_next_page());
    }

    #[async_std::test]
    async fn next_page_of_detached_page_is_none() {
        let page: Page<String> =
            serde_json::from_value(json!({ "data": [], "page": 1, "total_pages": 3 })).unwrap();
        assert!(page.next_page().await.unwrap().is_none());
    }
}
