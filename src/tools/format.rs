//! Plain-text rendering of API responses.
//!
//! Each item becomes a block that starts with a blank line and ends with
//! `---`; blocks are joined with `\n` under a one-line summary header.

use chrono::{DateTime, Local, TimeZone};

use crate::domain::{Collection, CollectionList, CreatedRaindrop, Raindrop, RaindropList};

pub const NO_BOOKMARKS: &str = "No bookmarks found matching your search.";
pub const NO_COLLECTIONS: &str = "No collections found.";

/// Render an RFC 3339 timestamp in `tz` as `M/D/YYYY, h:mm:ss AM`.
pub fn format_timestamp_in<Tz>(raw: Option<&str>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    raw.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| {
            dt.with_timezone(tz)
                .format("%-m/%-d/%Y, %-I:%M:%S %p")
                .to_string()
        })
        .unwrap_or_else(|| "Unknown".to_string())
}

pub fn format_timestamp(raw: Option<&str>) -> String {
    format_timestamp_in(raw, &Local)
}

pub fn format_created(created: &CreatedRaindrop) -> String {
    format!(
        "Bookmark created successfully: {}",
        created.link().unwrap_or_default()
    )
}

fn format_tags(tags: Option<&[String]>) -> String {
    match tags {
        Some(t) if !t.is_empty() => t.join(", "),
        _ => "No tags".to_string(),
    }
}

fn bookmark_block<Tz>(item: &Raindrop, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!(
        "\nTitle: {}\nURL: {}\nTags: {}\nCreated: {}\nLast Updated: {}\n---",
        item.title.as_deref().unwrap_or_default(),
        item.link.as_deref().unwrap_or_default(),
        format_tags(item.tags.as_deref()),
        format_timestamp_in(item.created.as_deref(), tz),
        format_timestamp_in(item.last_update.as_deref(), tz),
    )
}

/// `page` is the zero-based page that was requested; it is shown one-based.
pub fn format_search_results_in<Tz>(results: &RaindropList, page: Option<i64>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    if results.items.is_empty() {
        return NO_BOOKMARKS.to_string();
    }
    let blocks = results
        .items
        .iter()
        .map(|item| bookmark_block(item, tz))
        .collect::<Vec<_>>()
        .join("\n");
    let total = results.count.unwrap_or(results.items.len() as u64);
    format!(
        "Found {} total bookmarks (showing {} on page {}):\n{}",
        total,
        results.items.len(),
        page.unwrap_or(0).saturating_add(1),
        blocks
    )
}

pub fn format_search_results(results: &RaindropList, page: Option<i64>) -> String {
    format_search_results_in(results, page, &Local)
}

fn collection_block<Tz>(c: &Collection, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let id = c.id.map(|i| i.to_string()).unwrap_or_default();
    let parent = c
        .parent
        .as_ref()
        .and_then(|p| p.id)
        .map(|i| i.to_string())
        .unwrap_or_else(|| "None".to_string());
    format!(
        "\nName: {}\nID: {}\nCount: {} bookmarks\nParent: {}\nCreated: {}\n---",
        c.title.as_deref().unwrap_or_default(),
        id,
        c.count.unwrap_or(0),
        parent,
        format_timestamp_in(c.created.as_deref(), tz),
    )
}

pub fn format_collections_in<Tz>(list: &CollectionList, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    if list.items.is_empty() {
        return NO_COLLECTIONS.to_string();
    }
    let blocks = list
        .items
        .iter()
        .map(|c| collection_block(c, tz))
        .collect::<Vec<_>>()
        .join("\n");
    format!("Found {} collections:\n{}", list.items.len(), blocks)
}

pub fn format_collections(list: &CollectionList) -> String {
    format_collections_in(list, &Local)
}
