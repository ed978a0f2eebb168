use std::collections::BTreeMap;
use std::sync::Arc;

use crate::clients::raindrop::RaindropRemote;
use crate::core::error::RaindropError;
use crate::core::tool::{Arguments, Tool};
use crate::tools::bookmarks::{CreateBookmarkTool, SearchBookmarksTool};
use crate::tools::collections::ListCollectionsTool;

/// Name → tool lookup, sorted by name. Read-only once built and cheap to
/// clone across transports.
#[derive(Clone)]
pub struct ToolRegistry {
    by_name: Arc<BTreeMap<&'static str, Arc<dyn Tool>>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolMeta {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: serde_json::Value,
}

impl ToolRegistry {
    pub fn with_tools<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Tool>>,
    {
        let map = iter.into_iter().map(|t| (t.name(), t)).collect();
        Self { by_name: Arc::new(map) }
    }

    pub fn list(&self) -> Vec<ToolMeta> {
        self.by_name
            .values()
            .map(|t| ToolMeta {
                name: t.name(),
                description: t.description(),
                input_schema: t.input_schema(),
            })
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub async fn call(&self, name: &str, args: &Arguments) -> Result<String, RaindropError> {
        let t = self
            .by_name
            .get(name)
            .ok_or_else(|| RaindropError::UnknownTool(name.to_string()))?;
        t.call(args).await
    }
}

/// The three bookmark tools, sharing one API client.
pub fn build_registry(client: RaindropRemote) -> ToolRegistry {
    ToolRegistry::with_tools([
        Arc::new(CreateBookmarkTool::new(client.clone())) as Arc<dyn Tool>,
        Arc::new(SearchBookmarksTool::new(client.clone())),
        Arc::new(ListCollectionsTool::new(client)),
    ])
}
