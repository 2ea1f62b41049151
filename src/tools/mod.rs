//! 工具分发层：固定的五个工具
//!
//! - 描述符表查询：get_route / get_route_attribute / get_schema / get_schema_attribute
//! - 回环调用：invoke_route（白名单强制）

pub mod catalog;
pub mod error;
pub mod executor;
pub mod invoke_route;
pub mod registry;
pub mod schema;

use std::sync::Arc;

pub use catalog::{GetRouteAttributeTool, GetRouteTool, GetSchemaAttributeTool, GetSchemaTool};
pub use error::ToolError;
pub use executor::ToolExecutor;
pub use invoke_route::InvokeRouteTool;
pub use registry::{Tool, ToolRegistry};
pub use schema::tool_call_schema_json;

use crate::catalog::Catalog;

/// 注册全部五个工具
pub fn menu_registry(catalog: Arc<Catalog>, invoke: InvokeRouteTool) -> ToolRegistry {
    let mut tools = ToolRegistry::new();
    tools.register(GetRouteTool::new(catalog.clone()));
    tools.register(GetRouteAttributeTool::new(catalog.clone()));
    tools.register(GetSchemaTool::new(catalog.clone()));
    tools.register(GetSchemaAttributeTool::new(catalog));
    tools.register(invoke);
    tools
}
