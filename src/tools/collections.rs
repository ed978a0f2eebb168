use async_trait::async_trait;

use crate::clients::raindrop::RaindropRemote;
use crate::core::error::RaindropError;
use crate::core::tool::{Arguments, Tool, ToolSpec};
use crate::domain::args::ListCollectionsArgs;
use crate::tools::format::format_collections;

#[derive(Clone)]
pub struct ListCollectionsTool {
    client: RaindropRemote,
}

impl ListCollectionsTool {
    pub fn new(client: RaindropRemote) -> Self {
        Self { client }
    }
}

impl ToolSpec for ListCollectionsTool {
    fn name(&self) -> &'static str {
        "list-collections"
    }
    fn description(&self) -> &'static str {
        "List all your Raindrop.io collections"
    }
    fn input_schema(&self) -> serde_json::Value {
        ListCollectionsArgs::schema()
    }
}

#[async_trait]
impl Tool for ListCollectionsTool {
    async fn call(&self, arguments: &Arguments) -> Result<String, RaindropError> {
        ListCollectionsArgs::parse(arguments)?;
        let collections = self.client.list_collections().await?;
        Ok(format_collections(&collections))
    }
}
