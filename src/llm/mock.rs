//! Mock / Scripted LLM 客户端（无需 API）
//!
//! - MockLlmClient：回显最后一条 User 消息作为最终回复，便于本地跑通 /chat。
//! - ScriptedLlmClient：按顺序回放预设输出，并记录每次收到的请求，用于测试编排循环。

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm::{LlmClient, LlmError};
use crate::memory::{Message, Role};

#[derive(Debug, Default)]
pub struct MockLlmClient;

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, messages: &[Message]) -> Result<String, LlmError> {
        let last_user = messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
            .unwrap_or("(no input)");
        Ok(format!("Echo from Mock: {}", last_user))
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

/// 一步脚本：返回文本或返回错误
#[derive(Debug, Clone)]
pub enum Scripted {
    Reply(String),
    Fail(LlmError),
}

/// 回放客户端：脚本耗尽后返回 `fallback`（None 时报 Unavailable）
#[derive(Debug, Default)]
pub struct ScriptedLlmClient {
    script: Mutex<VecDeque<Scripted>>,
    fallback: Option<String>,
    seen: Mutex<Vec<Vec<Message>>>,
}

impl ScriptedLlmClient {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            script: Mutex::new(replies.into_iter().map(|s| Scripted::Reply(s.into())).collect()),
            fallback: None,
            seen: Mutex::new(Vec::new()),
        }
    }

    /// 每次都返回同一输出（用于模拟无限请求工具的模型）
    pub fn repeating(reply: impl Into<String>) -> Self {
        Self {
            fallback: Some(reply.into()),
            ..Self::default()
        }
    }

    pub fn push(&self, step: Scripted) {
        if let Ok(mut s) = self.script.lock() {
            s.push_back(step);
        }
    }

    /// 已收到的请求数
    pub fn calls(&self) -> usize {
        self.seen.lock().map(|s| s.len()).unwrap_or(0)
    }

    /// 第 n 次请求的完整消息（含 system）
    pub fn request(&self, n: usize) -> Option<Vec<Message>> {
        self.seen.lock().ok().and_then(|s| s.get(n).cloned())
    }
}

#[async_trait]
impl LlmClient for ScriptedLlmClient {
    async fn complete(&self, messages: &[Message]) -> Result<String, LlmError> {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(messages.to_vec());
        }
        let next = self.script.lock().ok().and_then(|mut s| s.pop_front());
        match next {
            Some(Scripted::Reply(r)) => Ok(r),
            Some(Scripted::Fail(e)) => Err(e),
            None => self
                .fallback
                .clone()
                .ok_or_else(|| LlmError::Unavailable("script exhausted".to_string())),
        }
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_echoes_last_user_message() {
        let out = MockLlmClient
            .complete(&[Message::system("sys"), Message::user("What sizes?")])
            .await
            .unwrap();
        assert_eq!(out, "Echo from Mock: What sizes?");
    }

    #[tokio::test]
    async fn test_scripted_replays_then_fails() {
        let c = ScriptedLlmClient::new(["one", "two"]);
        c.push(Scripted::Fail(LlmError::Unavailable("down".into())));
        assert_eq!(c.complete(&[]).await.unwrap(), "one");
        assert_eq!(c.complete(&[]).await.unwrap(), "two");
        assert_eq!(c.complete(&[]).await, Err(LlmError::Unavailable("down".into())));
        assert!(c.complete(&[]).await.is_err());
        assert_eq!(c.calls(), 4);
    }

    #[tokio::test]
    async fn test_repeating() {
        let c = ScriptedLlmClient::repeating("again");
        for _ in 0..5 {
            assert_eq!(c.complete(&[Message::user("x")]).await.unwrap(), "again");
        }
        assert_eq!(c.request(4).unwrap()[0].content, "x");
    }
}
