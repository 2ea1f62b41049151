//! Planner：调用模型并解析 Tool Call
//!
//! 调用 LLM 得到回复或 JSON Tool Call；parse_llm_output 从文本中提取 JSON 并解析为 ToolCall 或直接回复。

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::AgentError;
use crate::llm::LlmClient;
use crate::memory::{Conversation, Message};
use crate::tools::ToolError;

/// 模型返回的 Tool Call：{"tool": "get_route", "args": {"index": 0}}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    #[serde(alias = "name")]
    pub tool: String,
    #[serde(default, alias = "arguments", alias = "parameters")]
    pub args: Value,
}

impl ToolCall {
    /// 规范化：args 为空时给 {}；若是 JSON 字符串（OpenAI 风格）则先解析
    fn normalized(mut self) -> Self {
        self.tool = self.tool.trim().to_string();
        self.args = match self.args {
            Value::Null => Value::Object(Default::default()),
            Value::String(s) => serde_json::from_str(&s).unwrap_or(Value::String(s)),
            other => other,
        };
        self
    }

    /// 写入对话的 agent 工具请求轮次
    pub fn to_turn(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Planner 输出
#[derive(Debug, Clone, PartialEq)]
pub enum PlannerOutput {
    /// 直接回复用户
    Response(String),
    /// 需要执行工具
    ToolCall(ToolCall),
}

fn fenced_json(text: &str) -> Option<&str> {
    let start = text.find("```json")?;
    let rest = &text[start + 7..];
    Some(rest.find("```").map(|end| rest[..end].trim()).unwrap_or(rest.trim()))
}

/// 解析模型输出
///
/// - 以 `{` 开头或整段就是 ```json 代码块：必须是合法 tool call，否则 InvalidToolCall（回喂给模型）
/// - 正文中夹带的 ```json 代码块或 `{...}`：只有能解析成 tool call 时才当作工具请求，否则整段视为回复
/// - 其余文本：最终回复
pub fn parse_llm_output(output: &str) -> Result<PlannerOutput, ToolError> {
    let trimmed = output.trim();

    let (candidate, strict) = if let Some(block) = fenced_json(trimmed) {
        (block, trimmed.starts_with("```"))
    } else if trimmed.starts_with('{') {
        (trimmed, true)
    } else {
        match (trimmed.find('{'), trimmed.rfind('}')) {
            (Some(start), Some(end)) if start < end => (&trimmed[start..=end], false),
            _ => return Ok(PlannerOutput::Response(trimmed.to_string())),
        }
    };

    match serde_json::from_str::<ToolCall>(candidate) {
        Ok(call) if !call.tool.trim().is_empty() => Ok(PlannerOutput::ToolCall(call.normalized())),
        _ if !strict => Ok(PlannerOutput::Response(trimmed.to_string())),
        Ok(_) => Err(ToolError::InvalidToolCall(
            "tool name is empty".to_string(),
        )),
        Err(e) => Err(ToolError::InvalidToolCall(format!("{}: {}", e, candidate))),
    }
}

/// Planner：持有 LLM、system prompt 与单次调用超时
pub struct Planner {
    llm: Arc<dyn LlmClient>,
    system_prompt: String,
    timeout: Duration,
}

impl Planner {
    pub fn new(llm: Arc<dyn LlmClient>, system_prompt: impl Into<String>, timeout: Duration) -> Self {
        Self {
            llm,
            system_prompt: system_prompt.into(),
            timeout,
        }
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn model_name(&self) -> &str {
        self.llm.model_name()
    }

    /// system + 对话全部轮次 → 模型原始输出；失败或超时为 ModelUnavailable
    pub async fn plan(&self, conversation: &Conversation) -> Result<String, AgentError> {
        let mut full_messages = Vec::with_capacity(conversation.len() + 1);
        full_messages.push(Message::system(self.system_prompt.clone()));
        full_messages.extend_from_slice(conversation.messages());

        match tokio::time::timeout(self.timeout, self.llm.complete(&full_messages)).await {
            Ok(result) => result.map_err(AgentError::from),
            Err(_) => Err(AgentError::ModelUnavailable(format!(
                "model call timed out after {:?}",
                self.timeout
            ))),
        }
    }
}
