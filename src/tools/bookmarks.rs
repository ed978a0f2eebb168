use async_trait::async_trait;

use crate::clients::raindrop::RaindropRemote;
use crate::core::error::RaindropError;
use crate::core::tool::{Arguments, Tool, ToolSpec};
use crate::domain::args::{CreateBookmarkArgs, SearchBookmarksArgs};
use crate::domain::NewRaindrop;
use crate::tools::format::{format_created, format_search_results};

#[derive(Clone)]
pub struct CreateBookmarkTool {
    client: RaindropRemote,
}

impl CreateBookmarkTool {
    pub fn new(client: RaindropRemote) -> Self {
        Self { client }
    }
}

impl ToolSpec for CreateBookmarkTool {
    fn name(&self) -> &'static str {
        "create-bookmark"
    }
    fn description(&self) -> &'static str {
        "Create a new bookmark in Raindrop.io"
    }
    fn input_schema(&self) -> serde_json::Value {
        CreateBookmarkArgs::schema()
    }
}

#[async_trait]
impl Tool for CreateBookmarkTool {
    async fn call(&self, arguments: &Arguments) -> Result<String, RaindropError> {
        let args = CreateBookmarkArgs::parse(arguments)?;
        tracing::debug!(url = %args.url, collection = ?args.collection, "create-bookmark");
        let created = self.client.create_raindrop(&NewRaindrop::from(args)).await?;
        Ok(format_created(&created))
    }
}

#[derive(Clone)]
pub struct SearchBookmarksTool {
    client: RaindropRemote,
}

impl SearchBookmarksTool {
    pub fn new(client: RaindropRemote) -> Self {
        Self { client }
    }
}

impl ToolSpec for SearchBookmarksTool {
    fn name(&self) -> &'static str {
        "search-bookmarks"
    }
    fn description(&self) -> &'static str {
        "Search through your Raindrop.io bookmarks"
    }
    fn input_schema(&self) -> serde_json::Value {
        SearchBookmarksArgs::schema()
    }
}

#[async_trait]
impl Tool for SearchBookmarksTool {
    async fn call(&self, arguments: &Arguments) -> Result<String, RaindropError> {
        let args = SearchBookmarksArgs::parse(arguments)?;
        tracing::debug!(query = %args.query, collection = args.collection_id(), "search-bookmarks");
        let results = self.client.search_raindrops(&args).await?;
        Ok(format_search_results(&results, args.page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn args(v: serde_json::Value) -> Arguments {
        v.as_object().cloned().unwrap_or_default()
    }

    #[tokio::test]
    async fn create_calls_remote_and_shapes_output() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(POST)
                .path("/raindrop")
                .json_body(json!({"link": "https://docs.rs/", "collection": {"$id": 0}}));
            then.status(200)
                .json_body(json!({"result": true, "item": {"link": "https://docs.rs/"}}));
        });
        let tool = CreateBookmarkTool::new(RaindropRemote::new(server.base_url(), Some("t".into())));
        let out = tool.call(&args(json!({"url": "https://docs.rs/"}))).await.unwrap();
        m.assert();
        assert_eq!(out, "Bookmark created successfully: https://docs.rs/");
    }

    #[tokio::test]
    async fn create_with_bad_url_sends_nothing() {
        let server = MockServer::start();
        let m = server.mock(|_when, then| {
            then.status(200).json_body(json!({}));
        });
        let tool = CreateBookmarkTool::new(RaindropRemote::new(server.base_url(), Some("t".into())));
        let err = tool.call(&args(json!({"url": "not-a-url"}))).await.unwrap_err();
        assert!(matches!(err, RaindropError::Validation(_)));
        assert_eq!(m.hits(), 0);
    }

    #[tokio::test]
    async fn search_validation_runs_before_token_check() {
        let tool = SearchBookmarksTool::new(RaindropRemote::new("http://localhost:0", None));
        let err = tool.call(&Arguments::new()).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid arguments: query: Required");
    }

    #[tokio::test]
    async fn search_shows_requested_page() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/raindrops/0").query_param("page", "1");
            then.status(200)
                .json_body(json!({"count": 30, "items": [{"title": "t", "link": "https://x/"}]}));
        });
        let tool = SearchBookmarksTool::new(RaindropRemote::new(server.base_url(), Some("t".into())));
        let out = tool.call(&args(json!({"query": "t", "page": 1}))).await.unwrap();
        assert!(out.starts_with("Found 30 total bookmarks (showing 1 on page 2):"), "{out}");
    }
}
