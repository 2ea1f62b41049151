//! 描述符表查询工具：get_route / get_route_attribute / get_schema / get_schema_attribute
//!
//! 只读访问共享的 `Arc<Catalog>`；越界下标与未知属性都返回可回喂给模型的错误。

use std::sync::Arc;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::catalog::{Attribute, Catalog};
use crate::tools::registry::{args_schema, parse_args};
use crate::tools::{Tool, ToolError};

#[derive(Debug, Deserialize, JsonSchema)]
struct IndexArgs {
    /// 0 起始的表下标
    index: i64,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct AttributeArgs {
    /// 0 起始的表下标
    index: i64,
    /// 字段名，如 route、method、parameters、properties
    attribute: String,
}

fn attribute_result(attribute: String, found: Attribute) -> Result<Value, ToolError> {
    match found {
        Attribute::Found(value) => Ok(json!({ "attribute": attribute, "value": value })),
        Attribute::Unknown { available } => Err(ToolError::UnknownAttribute {
            attribute,
            available,
        }),
    }
}

pub struct GetRouteTool {
    catalog: Arc<Catalog>,
}

impl GetRouteTool {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl Tool for GetRouteTool {
    fn name(&self) -> &str {
        "get_route"
    }

    fn description(&self) -> &str {
        "Get a route from the route table by its 0-based index. Args: {\"index\": 0}"
    }

    fn parameters_schema(&self) -> Value {
        args_schema::<IndexArgs>()
    }

    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let args: IndexArgs = parse_args(self.name(), args)?;
        tracing::debug!(index = args.index, "get_route");
        let route = self.catalog.route_at(args.index)?;
        Ok(serde_json::to_value(route).unwrap_or(Value::Null))
    }
}

pub struct GetRouteAttributeTool {
    catalog: Arc<Catalog>,
}

impl GetRouteAttributeTool {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl Tool for GetRouteAttributeTool {
    fn name(&self) -> &str {
        "get_route_attribute"
    }

    fn description(&self) -> &str {
        "Get one attribute (route, method, description, parameters, response) of a route by index. Args: {\"index\": 0, \"attribute\": \"route\"}"
    }

    fn parameters_schema(&self) -> Value {
        args_schema::<AttributeArgs>()
    }

    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let args: AttributeArgs = parse_args(self.name(), args)?;
        tracing::debug!(index = args.index, attribute = %args.attribute, "get_route_attribute");
        let found = self.catalog.route_attribute(args.index, &args.attribute)?;
        attribute_result(args.attribute, found)
    }
}

pub struct GetSchemaTool {
    catalog: Arc<Catalog>,
}

impl GetSchemaTool {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl Tool for GetSchemaTool {
    fn name(&self) -> &str {
        "get_schema"
    }

    fn description(&self) -> &str {
        "Get a resource schema from the schema table by its 0-based index. Args: {\"index\": 0}"
    }

    fn parameters_schema(&self) -> Value {
        args_schema::<IndexArgs>()
    }

    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let args: IndexArgs = parse_args(self.name(), args)?;
        tracing::debug!(index = args.index, "get_schema");
        let schema = self.catalog.schema_at(args.index)?;
        Ok(serde_json::to_value(schema).unwrap_or(Value::Null))
    }
}

pub struct GetSchemaAttributeTool {
    catalog: Arc<Catalog>,
}

impl GetSchemaAttributeTool {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl Tool for GetSchemaAttributeTool {
    fn name(&self) -> &str {
        "get_schema_attribute"
    }

    fn description(&self) -> &str {
        "Get one attribute (title, type, properties, required) of a schema by index. Args: {\"index\": 0, \"attribute\": \"properties\"}"
    }

    fn parameters_schema(&self) -> Value {
        args_schema::<AttributeArgs>()
    }

    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let args: AttributeArgs = parse_args(self.name(), args)?;
        tracing::debug!(index = args.index, attribute = %args.attribute, "get_schema_attribute");
        let found = self.catalog.schema_attribute(args.index, &args.attribute)?;
        attribute_result(args.attribute, found)
    }
}
