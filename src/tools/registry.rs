//! 工具注册表
//!
//! 所有工具实现 Tool trait（name / description / parameters_schema / execute），由 ToolRegistry 按名注册与查找，
//! ToolExecutor 在调用时加超时并输出审计日志。

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::tools::ToolError;

/// 工具 trait：名称、描述（供模型理解）、参数 schema、异步执行（args / 结果均为 JSON）
#[async_trait]
pub trait Tool: Send + Sync {
    /// 工具名称（对应 tool call JSON 中的 "tool" 字段）
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// 参数 JSON Schema；默认无参数
    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {},
            "required": []
        })
    }

    async fn execute(&self, args: Value) -> Result<Value, ToolError>;
}

/// 按参数类型生成 JSON Schema（去掉 $schema 头）
pub fn args_schema<T: JsonSchema>() -> Value {
    let mut v = serde_json::to_value(schema_for!(T)).unwrap_or(Value::Null);
    if let Some(obj) = v.as_object_mut() {
        obj.remove("$schema");
    }
    v
}

/// 把 args 反序列化为具体参数类型，失败时给出 InvalidArguments
pub fn parse_args<T: DeserializeOwned>(tool: &str, args: Value) -> Result<T, ToolError> {
    serde_json::from_value(args).map_err(|e| ToolError::InvalidArguments {
        tool: tool.to_string(),
        reason: e.to_string(),
    })
}

/// 工具注册表：按名称存储 Arc<dyn Tool>
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, tool: impl Tool + 'static) {
        let name = tool.name().to_string();
        self.tools.insert(name, Arc::new(tool));
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub async fn execute(&self, name: &str, args: Value) -> Result<Value, ToolError> {
        let tool = self.tools.get(name).ok_or_else(|| ToolError::UnknownTool {
            name: name.to_string(),
            available: self.tool_names(),
        })?;
        tool.execute(args).await
    }

    /// 按名称排序，保证系统提示词稳定
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// 返回 (name, description) 列表，用于生成 prompt 中的工具段落
    pub fn tool_descriptions(&self) -> Vec<(String, String)> {
        self.tool_names()
            .into_iter()
            .filter_map(|name| {
                let desc = self.tools.get(&name)?.description().to_string();
                Some((name, desc))
            })
            .collect()
    }

    /// 工具目录 JSON：名称、描述与参数 schema
    pub fn to_schema_json(&self) -> String {
        let tools: Vec<Value> = self
            .tool_names()
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|tool| {
                serde_json::json!({
                    "name": tool.name(),
                    "description": tool.description(),
                    "parameters": tool.parameters_schema()
                })
            })
            .collect();
        serde_json::to_string_pretty(&tools).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Constant(&'static str);

    #[async_trait]
    impl Tool for Constant {
        fn name(&self) -> &str {
            self.0
        }

        fn description(&self) -> &str {
            "returns its own name"
        }

        async fn execute(&self, _args: Value) -> Result<Value, ToolError> {
            Ok(json!(self.0))
        }
    }

    #[tokio::test]
    async fn test_register_and_execute() {
        let mut r = ToolRegistry::new();
        r.register(Constant("b"));
        r.register(Constant("a"));
        assert_eq!(r.tool_names(), vec!["a", "b"]);
        assert_eq!(r.execute("a", json!({})).await.unwrap(), json!("a"));
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let mut r = ToolRegistry::new();
        r.register(Constant("a"));
        match r.execute("zzz", json!({})).await {
            Err(ToolError::UnknownTool { name, available }) => {
                assert_eq!(name, "zzz");
                assert_eq!(available, vec!["a"]);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_schema_json_lists_tools_in_order() {
        let mut r = ToolRegistry::new();
        r.register(Constant("z"));
        r.register(Constant("m"));
        let v: Value = serde_json::from_str(&r.to_schema_json()).unwrap();
        assert_eq!(v[0]["name"], "m");
        assert_eq!(v[1]["name"], "z");
        assert_eq!(v[0]["parameters"]["type"], "object");
    }
}
