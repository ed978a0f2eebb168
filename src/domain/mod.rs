pub mod args;
pub mod validate;

use serde::{Deserialize, Serialize};

/// A saved bookmark as the Raindrop API returns it. Every field may be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Raindrop {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default, rename = "lastUpdate")]
    pub last_update: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RaindropList {
    #[serde(default)]
    pub items: Vec<Raindrop>,
    /// Total matches across all pages.
    #[serde(default)]
    pub count: Option<u64>,
}

/// Response to `POST /raindrop`; the live API nests the bookmark under `item`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatedRaindrop {
    #[serde(default)]
    pub item: Option<Raindrop>,
    #[serde(default)]
    pub link: Option<String>,
}

impl CreatedRaindrop {
    pub fn link(&self) -> Option<&str> {
        self.item
            .as_ref()
            .and_then(|i| i.link.as_deref())
            .or(self.link.as_deref())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParentRef {
    #[serde(default, rename = "$id", alias = "_id")]
    pub id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Collection {
    #[serde(default, rename = "_id")]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub parent: Option<ParentRef>,
    #[serde(default)]
    pub created: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectionList {
    #[serde(default)]
    pub items: Vec<Collection>,
}

/// Body of `POST /raindrop`.
#[derive(Debug, Clone, Serialize)]
pub struct NewRaindrop {
    pub link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    pub collection: CollectionRef,
}

/// `{"$id": n}`; id 0 leaves placement to the service default.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct CollectionRef {
    #[serde(rename = "$id")]
    pub id: i64,
}

impl From<args::CreateBookmarkArgs> for NewRaindrop {
    fn from(a: args::CreateBookmarkArgs) -> Self {
        Self {
            link: a.url,
            title: a.title,
            tags: a.tags,
            collection: CollectionRef {
                id: a.collection.unwrap_or(0),
            },
        }
    }
}
