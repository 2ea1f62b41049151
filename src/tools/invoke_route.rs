//! invoke_route 工具：回环 HTTP 调用本服务自己的菜单路由
//!
//! 先做白名单校验（method + path 必须命中路由表），再向绑定的回环地址发请求；
//! 任何 HTTP 响应（含非 2xx）都把 body 解析为 JSON 作为工具结果；
//! 拿不到响应为 Transport，body 不是 JSON（包括空 body）为 MalformedResponse。

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use crate::catalog::{Catalog, HttpMethod};
use crate::tools::registry::{args_schema, parse_args};
use crate::tools::{Tool, ToolError};

#[derive(Debug, Deserialize, JsonSchema)]
struct InvokeArgs {
    /// HTTP 方法，如 GET
    method: String,
    /// 路由路径（不含 base url），占位符替换为实际 ID，如 /pizza/get_pizza_size/1
    #[serde(alias = "route")]
    path: String,
}

pub struct InvokeRouteTool {
    client: Client,
    timeout: Duration,
    base_url: String,
    catalog: Arc<Catalog>,
    enforce_allowlist: bool,
}

impl InvokeRouteTool {
    /// base_url 为服务实际绑定的回环地址，如 http://127.0.0.1:9002
    pub fn new(base_url: impl Into<String>, catalog: Arc<Catalog>, timeout_secs: u64) -> Self {
        let timeout = Duration::from_secs(timeout_secs);
        let client = Client::builder().timeout(timeout).build().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to build loopback HTTP client, using defaults");
            Client::default()
        });
        Self {
            client,
            timeout,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            catalog,
            enforce_allowlist: true,
        }
    }

    /// 关闭白名单仅用于诊断
    pub fn with_allowlist(mut self, enforce: bool) -> Self {
        self.enforce_allowlist = enforce;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn check_allowed(&self, method: &str, path: &str) -> Result<HttpMethod, ToolError> {
        let violation = || ToolError::PolicyViolation {
            method: method.to_string(),
            path: path.to_string(),
        };
        let parsed: HttpMethod = method.parse().map_err(|_| violation())?;
        if self.enforce_allowlist && self.catalog.find_route(parsed, path).is_none() {
            return Err(violation());
        }
        if !path.starts_with('/') {
            return Err(violation());
        }
        Ok(parsed)
    }

    async fn call(&self, method: HttpMethod, path: &str) -> Result<Value, ToolError> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .client
            .request(method.into(), &url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ToolError::Transport {
                url: url.clone(),
                reason: e.to_string(),
            })?;
        let status = resp.status();
        let body = resp.bytes().await.map_err(|e| ToolError::Transport {
            url: url.clone(),
            reason: e.to_string(),
        })?;
        tracing::info!(%method, %url, status = status.as_u16(), bytes = body.len(), "loopback call");

        serde_json::from_slice(&body).map_err(|e| ToolError::MalformedResponse {
            url,
            status: status.as_u16(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl Tool for InvokeRouteTool {
    fn name(&self) -> &str {
        "invoke_route"
    }

    fn description(&self) -> &str {
        "Call one of the routes from the route table and return its JSON response. Pass only the path, never the base url, with any {id} placeholder replaced by a number. Args: {\"method\": \"GET\", \"path\": \"/pizza/get_pizza_sizes\"}"
    }

    fn parameters_schema(&self) -> Value {
        args_schema::<InvokeArgs>()
    }

    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let args: InvokeArgs = parse_args(self.name(), args)?;
        let path = args.path.trim();
        let method = match self.check_allowed(&args.method, path) {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!(method = %args.method, path = %path, "invoke_route rejected by allowlist");
                return Err(e);
            }
        };
        self.call(method, path).await
    }
}
