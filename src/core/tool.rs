use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::core::error::RaindropError;

/// Raw, not yet validated tool arguments.
pub type Arguments = Map<String, Value>;

/// Minimal metadata every tool must expose.
pub trait ToolSpec {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn input_schema(&self) -> Value;
}

/// Tool = Spec + a single request/response call producing text.
#[async_trait]
pub trait Tool: ToolSpec + Send + Sync {
    async fn call(&self, arguments: &Arguments) -> Result<String, RaindropError>;
}

/// Test double that answers with its arguments serialised as JSON.
#[cfg(test)]
pub(crate) struct Echo;

#[cfg(test)]
impl ToolSpec for Echo {
    fn name(&self) -> &'static str {
        "test-echo"
    }
    fn description(&self) -> &'static str {
        "echo tool"
    }
    fn input_schema(&self) -> Value {
        serde_json::json!({"type":"object"})
    }
}

#[cfg(test)]
#[async_trait]
impl Tool for Echo {
    async fn call(&self, args: &Arguments) -> Result<String, RaindropError> {
        Ok(Value::Object(args.clone()).to_string())
    }
}
