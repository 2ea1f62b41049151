//! Schema 描述符：每种菜单资源一份 JSON-schema 形状的描述
//!
//! 由 schemars 从资源模型生成，去掉 `definitions` / `$defs`（嵌套引用保持原样，模型只需看字段名与类型）。

use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SchemaDescriptor {
    pub index: usize,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// 字段名 -> 类型/约束
    pub properties: Map<String, Value>,
    pub required: Vec<String>,
}

impl SchemaDescriptor {
    /// 从实现 JsonSchema 的类型生成描述符
    pub fn of<T: JsonSchema>(index: usize) -> Self {
        let value = serde_json::to_value(schema_for!(T)).unwrap_or(Value::Null);
        Self::from_json_schema(index, value)
    }

    /// 从任意 JSON schema 值生成；缺失的部分用空值补齐
    pub fn from_json_schema(index: usize, schema: Value) -> Self {
        let title = schema
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let properties = schema
            .get("properties")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();
        let required = schema
            .get("required")
            .and_then(Value::as_array)
            .map(|a| {
                a.iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default();
        Self {
            index,
            title,
            kind: "object".to_string(),
            properties,
            required,
        }
    }
}

/// 模型 schema 去掉定义块后的 JSON，供路由 response 使用
pub fn stripped_schema<T: JsonSchema>() -> Value {
    let mut value = serde_json::to_value(schema_for!(T)).unwrap_or(Value::Null);
    if let Some(obj) = value.as_object_mut() {
        obj.remove("definitions");
        obj.remove("$defs");
        obj.remove("$schema");
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[allow(dead_code)]
    #[derive(JsonSchema)]
    struct Sample {
        id: i64,
        name: String,
        note: Option<String>,
    }

    #[test]
    fn test_schema_from_type() {
        let s = SchemaDescriptor::of::<Sample>(2);
        assert_eq!(s.index, 2);
        assert_eq!(s.title, "Sample");
        assert!(s.properties.contains_key("id"));
        assert!(s.properties.contains_key("note"));
        assert!(s.required.contains(&"name".to_string()));
        assert!(!s.required.contains(&"note".to_string()));
    }

    #[test]
    fn test_schema_from_partial_json() {
        let s = SchemaDescriptor::from_json_schema(0, json!({"properties": {"a": {"type": "string"}}}));
        assert_eq!(s.title, "");
        assert!(s.required.is_empty());
        assert_eq!(s.properties["a"]["type"], "string");
    }

    #[test]
    fn test_stripped_schema_has_no_definitions() {
        let v = stripped_schema::<Sample>();
        assert!(v.get("definitions").is_none());
        assert!(v.get("$schema").is_none());
        assert!(v.get("properties").is_some());
    }
}
