//! 工具错误
//!
//! 分两类：模型自己的输入有误（下标越界、未知属性、未列入白名单的路由等），作为 tool-result 回喂给模型自行纠正；
//! 环境故障（回环请求无响应、响应不是 JSON、超时），上抛到对话服务边界。

use thiserror::Error;

use crate::catalog::CatalogError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ToolError {
    #[error("Invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: String, reason: String },

    #[error("Invalid tool call: {0}")]
    InvalidToolCall(String),

    #[error("Unknown tool: {name} (available: {})", available.join(", "))]
    UnknownTool { name: String, available: Vec<String> },

    #[error(transparent)]
    NotFound(#[from] CatalogError),

    #[error("Unknown attribute '{attribute}' (available: {})", available.join(", "))]
    UnknownAttribute {
        attribute: String,
        available: Vec<String>,
    },

    #[error("Route not allowed: {method} {path} is not in the route table")]
    PolicyViolation { method: String, path: String },

    #[error("Request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("Response from {url} is not valid JSON (HTTP {status}): {reason}")]
    MalformedResponse {
        url: String,
        status: u16,
        reason: String,
    },

    #[error("Tool timeout: {0}")]
    Timeout(String),
}

impl ToolError {
    /// 是否由模型输入导致（可回喂给模型）
    pub fn is_model_fault(&self) -> bool {
        matches!(
            self,
            ToolError::InvalidArguments { .. }
                | ToolError::InvalidToolCall(_)
                | ToolError::UnknownTool { .. }
                | ToolError::NotFound(_)
                | ToolError::UnknownAttribute { .. }
                | ToolError::PolicyViolation { .. }
        )
    }

    /// 写入 tool-result 的简短类别标签
    pub fn kind(&self) -> &'static str {
        match self {
            ToolError::InvalidArguments { .. } => "invalid_arguments",
            ToolError::InvalidToolCall(_) => "invalid_tool_call",
            ToolError::UnknownTool { .. } => "unknown_tool",
            ToolError::NotFound(_) => "not_found",
            ToolError::UnknownAttribute { .. } => "unknown_attribute",
            ToolError::PolicyViolation { .. } => "policy_violation",
            ToolError::Transport { .. } => "transport_failure",
            ToolError::MalformedResponse { .. } => "malformed_response",
            ToolError::Timeout(_) => "timeout",
        }
    }
}
