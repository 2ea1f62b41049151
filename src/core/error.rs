//! Agent 错误类型与对话服务统一错误
//!
//! AgentError 是一次编排的终止原因；ChatError 是 /chat 边界唯一对外的错误形状。

use std::time::Duration;

use thiserror::Error;

use crate::llm::LlmError;
use crate::tools::ToolError;

/// 编排失败（对请求是终止性的，对进程不是）
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AgentError {
    #[error("Tool loop exceeded: model kept requesting tools after {max_steps} tool calls")]
    ToolLoopExceeded { max_steps: usize },

    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// 环境类工具故障（Transport / MalformedResponse / Timeout）
    #[error("Tool {tool} failed: {source}")]
    ToolFailed { tool: String, source: ToolError },

    #[error("Chat timed out after {0:?}")]
    Timeout(Duration),

    #[error("Cancelled")]
    Cancelled,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<LlmError> for AgentError {
    fn from(e: LlmError) -> Self {
        AgentError::ModelUnavailable(e.to_string())
    }
}

/// /chat 对外错误：只携带底层消息
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{detail}")]
pub struct ChatError {
    pub detail: String,
}

impl From<AgentError> for ChatError {
    fn from(e: AgentError) -> Self {
        Self {
            detail: e.to_string(),
        }
    }
}
