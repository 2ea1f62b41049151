//! LLM 客户端抽象
//!
//! 所有后端（OpenAI 兼容 / Mock / Scripted）实现 LlmClient::complete：
//! 输入 system + 对话全部轮次，输出纯文本；文本要么是最终回复，要么是 `{"tool": ..., "args": ...}` 工具调用。

use async_trait::async_trait;
use thiserror::Error;

use crate::memory::Message;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LlmError {
    /// 后端不可达、鉴权失败、HTTP 错误等
    #[error("Model backend unavailable: {0}")]
    Unavailable(String),

    /// 后端有响应但内容不可用（无 choices 等）
    #[error("Invalid model response: {0}")]
    InvalidResponse(String),
}

/// LLM 客户端 trait：非流式完成
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, messages: &[Message]) -> Result<String, LlmError>;

    /// 用于日志的后端标识
    fn model_name(&self) -> &str {
        "unknown"
    }
}
