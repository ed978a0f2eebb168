//! Typed tool arguments and the JSON schemas advertised for them.

use std::fmt;
use std::str::FromStr;

use serde_json::{json, Value};

use crate::core::error::RaindropError;
use crate::core::tool::Arguments;
use crate::domain::validate::ArgReader;

pub const MAX_PER_PAGE: i64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    CreatedDesc,
    Created,
    LastUpdateDesc,
    LastUpdate,
    TitleDesc,
    Title,
    DomainDesc,
    Domain,
}

impl SortOrder {
    pub const ALL: [&'static str; 8] = [
        "-created",
        "created",
        "-last_update",
        "last_update",
        "-title",
        "title",
        "-domain",
        "domain",
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::CreatedDesc => "-created",
            SortOrder::Created => "created",
            SortOrder::LastUpdateDesc => "-last_update",
            SortOrder::LastUpdate => "last_update",
            SortOrder::TitleDesc => "-title",
            SortOrder::Title => "title",
            SortOrder::DomainDesc => "-domain",
            SortOrder::Domain => "domain",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "-created" => SortOrder::CreatedDesc,
            "created" => SortOrder::Created,
            "-last_update" => SortOrder::LastUpdateDesc,
            "last_update" => SortOrder::LastUpdate,
            "-title" => SortOrder::TitleDesc,
            "title" => SortOrder::Title,
            "-domain" => SortOrder::DomainDesc,
            "domain" => SortOrder::Domain,
            other => return Err(format!("unknown sort order: {other}")),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBookmarkArgs {
    pub url: String,
    pub title: Option<String>,
    pub tags: Option<Vec<String>>,
    pub collection: Option<i64>,
}

impl CreateBookmarkArgs {
    pub fn parse(args: &Arguments) -> Result<Self, RaindropError> {
        let mut r = ArgReader::new(args);
        let url = r.required_url("url");
        let title = r.optional_string("title");
        let tags = r.optional_string_list("tags");
        let collection = r.optional_integer("collection", None, None);
        r.finish()?;
        Ok(Self {
            url: url.unwrap_or_default(),
            title,
            tags,
            collection,
        })
    }

    pub fn schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "url": { "type": "string", "format": "uri", "description": "URL to bookmark" },
                "title": { "type": "string", "description": "Title for the bookmark (optional)" },
                "tags": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Tags for the bookmark (optional)"
                },
                "collection": { "type": "integer", "description": "Collection ID to save to (optional)" }
            },
            "required": ["url"]
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBookmarksArgs {
    pub query: String,
    pub tags: Option<Vec<String>>,
    pub page: Option<i64>,
    pub perpage: Option<i64>,
    pub sort: Option<SortOrder>,
    pub collection: Option<i64>,
    pub word: Option<bool>,
}

impl SearchBookmarksArgs {
    pub fn parse(args: &Arguments) -> Result<Self, RaindropError> {
        let mut r = ArgReader::new(args);
        let query = r.required_string("query");
        let tags = r.optional_string_list("tags");
        let page = r.optional_integer("page", Some(0), None);
        let perpage = r.optional_integer("perpage", Some(1), Some(MAX_PER_PAGE));
        let sort = r.optional_enum::<SortOrder>("sort", &SortOrder::ALL);
        let collection = r.optional_integer("collection", None, None);
        let word = r.optional_bool("word");
        r.finish()?;
        Ok(Self {
            query: query.unwrap_or_default(),
            tags,
            page,
            perpage,
            sort,
            collection,
            word,
        })
    }

    /// Collection searched when none is given: 0 means all collections.
    pub fn collection_id(&self) -> i64 {
        self.collection.unwrap_or(0)
    }

    /// Query string pairs; optional fields that were not given are left out.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("search", self.query.clone())];
        if let Some(tags) = &self.tags {
            pairs.push(("tags", tags.join(",")));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(perpage) = self.perpage {
            pairs.push(("perpage", perpage.to_string()));
        }
        if let Some(sort) = self.sort {
            pairs.push(("sort", sort.to_string()));
        }
        if let Some(word) = self.word {
            pairs.push(("word", word.to_string()));
        }
        pairs
    }

    pub fn schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": { "type": "string", "description": "Search query" },
                "tags": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Filter by tags (optional)"
                },
                "page": { "type": "integer", "minimum": 0, "description": "Page number (0-based, optional)" },
                "perpage": {
                    "type": "integer",
                    "minimum": 1,
                    "maximum": MAX_PER_PAGE,
                    "description": "Items per page (1-50, optional)"
                },
                "sort": {
                    "type": "string",
                    "enum": SortOrder::ALL,
                    "description": "Sort order (optional). Prefix with - for descending order."
                },
                "collection": {
                    "type": "integer",
                    "description": "Collection ID to search in (optional, 0 for all collections)"
                },
                "word": { "type": "boolean", "description": "Whether to match exact words only (optional)" }
            },
            "required": ["query"]
        })
    }
}

/// `list-collections` takes no arguments; extra keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListCollectionsArgs;

impl ListCollectionsArgs {
    pub fn parse(args: &Arguments) -> Result<Self, RaindropError> {
        ArgReader::new(args).finish()?;
        Ok(Self)
    }

    pub fn schema() -> Value {
        json!({ "type": "object", "properties": {} })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: Value) -> Arguments {
        v.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn create_requires_a_valid_url() {
        let err = CreateBookmarkArgs::parse(&args(json!({"url": "not-a-url"}))).unwrap_err();
        assert_eq!(err.to_string(), "Invalid arguments: url: Invalid url");

        let err = CreateBookmarkArgs::parse(&Arguments::new()).unwrap_err();
        assert_eq!(err.to_string(), "Invalid arguments: url: Required");
    }

    #[test]
    fn create_collects_all_violations_in_field_order() {
        let err = CreateBookmarkArgs::parse(&args(json!({
            "collection": "inbox",
            "tags": "rust",
            "title": 7
        })))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid arguments: url: Required, title: Expected string, received number, \
             tags: Expected array, received string, collection: Expected number, received string"
        );
    }

    #[test]
    fn create_parses_full_arguments() {
        let parsed = CreateBookmarkArgs::parse(&args(json!({
            "url": "https://www.rust-lang.org/",
            "title": "Rust",
            "tags": ["lang", "systems"],
            "collection": 42
        })))
        .unwrap();
        assert_eq!(parsed.url, "https://www.rust-lang.org/");
        assert_eq!(parsed.title.as_deref(), Some("Rust"));
        assert_eq!(parsed.tags, Some(vec!["lang".to_string(), "systems".to_string()]));
        assert_eq!(parsed.collection, Some(42));
    }

    #[test]
    fn search_with_only_query_yields_only_search_pair() {
        let parsed = SearchBookmarksArgs::parse(&args(json!({"query": "rust"}))).unwrap();
        assert_eq!(parsed.query_pairs(), vec![("search", "rust".to_string())]);
        assert_eq!(parsed.collection_id(), 0);
    }

    #[test]
    fn search_accepts_empty_query() {
        let parsed = SearchBookmarksArgs::parse(&args(json!({"query": ""}))).unwrap();
        assert_eq!(parsed.query_pairs(), vec![("search", String::new())]);
    }

    #[test]
    fn search_pairs_include_every_given_option() {
        let parsed = SearchBookmarksArgs::parse(&args(json!({
            "query": "async",
            "tags": ["rust", "tokio"],
            "page": 2,
            "perpage": 25,
            "sort": "-created",
            "collection": 7,
            "word": false
        })))
        .unwrap();
        assert_eq!(
            parsed.query_pairs(),
            vec![
                ("search", "async".to_string()),
                ("tags", "rust,tokio".to_string()),
                ("page", "2".to_string()),
                ("perpage", "25".to_string()),
                ("sort", "-created".to_string()),
                ("word", "false".to_string()),
            ]
        );
        assert_eq!(parsed.collection_id(), 7);
    }

    #[test]
    fn search_rejects_out_of_range_paging() {
        let err = SearchBookmarksArgs::parse(&args(json!({"query": "x", "perpage": 51})))
            .unwrap_err();
        assert!(err.to_string().contains("perpage: "), "{err}");

        let err = SearchBookmarksArgs::parse(&args(json!({"query": "x", "page": -1})))
            .unwrap_err();
        assert!(err.to_string().contains("page: "), "{err}");

        let err = SearchBookmarksArgs::parse(&args(json!({"query": "x", "perpage": 0})))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid arguments: perpage: Number must be greater than or equal to 1"
        );
    }

    #[test]
    fn search_rejects_unknown_sort() {
        let err = SearchBookmarksArgs::parse(&args(json!({"query": "x", "sort": "newest"})))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid arguments: sort: Invalid enum value. Expected '-created' | 'created' | \
             '-last_update' | 'last_update' | '-title' | 'title' | '-domain' | 'domain', \
             received 'newest'"
        );
    }

    #[test]
    fn sort_order_round_trips_through_str() {
        for s in SortOrder::ALL {
            assert_eq!(s.parse::<SortOrder>().unwrap().as_str(), s);
        }
    }

    #[test]
    fn list_collections_ignores_extra_keys() {
        assert!(ListCollectionsArgs::parse(&args(json!({"anything": 1}))).is_ok());
    }

    #[test]
    fn schemas_mark_required_fields() {
        assert_eq!(CreateBookmarkArgs::schema()["required"], json!(["url"]));
        assert_eq!(SearchBookmarksArgs::schema()["required"], json!(["query"]));
        assert_eq!(SearchBookmarksArgs::schema()["properties"]["sort"]["enum"][0], "-created");
        assert!(ListCollectionsArgs::schema()["properties"].as_object().unwrap().is_empty());
    }
}
