//! System prompt 组装：基础说明 + 路由表 + Schema 表 + 工具列表 + tool call 格式

use crate::catalog::Catalog;
use crate::tools::{tool_call_schema_json, ToolRegistry};

/// 未配置 system_prompt_path 时的基础说明
pub const DEFAULT_BASE_PROMPT: &str = "\
You are the assistant of a pizza shop. You answer questions about the menu: sizes, sauces, crusts, \
topping categories, toppings and designer pizzas.

You can look up the API of the shop with your tools and then call it to fetch live data. \
Work step by step: find the route you need in the route table, call it with invoke_route, \
then answer the user in plain language using only the data you received.";

/// 拼出完整 system prompt
///
/// 表的下标从 0 开始；invoke_route 只接受路由表中的路由，path 不带主机和端口。
pub fn system_instructions(base: &str, catalog: &Catalog, registry: &ToolRegistry) -> String {
    let routes = serde_json::to_string_pretty(catalog.routes()).unwrap_or_default();
    let schemas = serde_json::to_string_pretty(catalog.schemas()).unwrap_or_default();
    let tools = registry
        .tool_descriptions()
        .into_iter()
        .map(|(name, desc)| format!("- {}: {}", name, desc))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{base}\n\n\
         ## Routes\n\
         The route table (0-indexed, {route_count} entries):\n{routes}\n\n\
         ## Schemas\n\
         The schema table (0-indexed, {schema_count} entries):\n{schemas}\n\n\
         ## Tools\n{tools}\n\n\
         Tool parameters:\n{tool_schema}\n\n\
         ## How to call a tool\n\
         Reply with ONLY a JSON object and nothing else:\n\
         {{\"tool\": \"<tool name>\", \"args\": {{...}}}}\n\
         It must match this JSON Schema:\n{call_schema}\n\n\
         Rules:\n\
         - Indices are 0-based.\n\
         - invoke_route only accepts routes listed in the route table. Fill every {{placeholder}} with a number.\n\
         - Give invoke_route a path such as /pizza/get_pizza_sizes, without scheme, host or port.\n\
         - A tool result or error is sent back to you as a message; fix your call if it failed.\n\
         - When you have the answer, reply with plain text (no JSON).",
        base = base.trim(),
        route_count = catalog.routes().len(),
        routes = routes,
        schema_count = catalog.schemas().len(),
        schemas = schemas,
        tools = tools,
        tool_schema = registry.to_schema_json(),
        call_schema = tool_call_schema_json(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{menu_registry, InvokeRouteTool};
    use std::sync::Arc;

    #[test]
    fn test_prompt_contains_tables_and_tools() {
        let catalog = Arc::new(Catalog::menu());
        let invoke = InvokeRouteTool::new("http://127.0.0.1:1", catalog.clone(), 1);
        let registry = menu_registry(catalog.clone(), invoke);
        let prompt = system_instructions(DEFAULT_BASE_PROMPT, &catalog, &registry);

        assert!(prompt.starts_with("You are the assistant of a pizza shop."));
        assert!(prompt.contains("/pizza/get_pizza_sizes"));
        assert!(prompt.contains("/pizza/get_designer_pizza/{pizza_id}"));
        assert!(prompt.contains("ToppingCategory"));
        for name in registry.tool_names() {
            assert!(prompt.contains(&name), "missing tool {}", name);
        }
        assert!(prompt.contains("0-based"));
    }
}
