//! 单次对话的轮次记录
//!
//! 只属于一次进行中的编排，结束即丢弃；不跨请求、不持久化。
//! 顺序固定：user → 零或多组 [agent 工具请求, tool 结果] → agent 最终回复。

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// 消息角色；System 只在组装模型请求时出现，不进入 Conversation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Agent,
    Tool,
    System,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn agent(content: impl Into<String>) -> Self {
        Self {
            role: Role::Agent,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// 工具成功结果：`{"tool": name, "result": value}`
    pub fn tool_result(tool: &str, result: &Value) -> Self {
        Self {
            role: Role::Tool,
            content: json!({ "tool": tool, "result": result }).to_string(),
        }
    }

    /// 工具错误结果：`{"tool": name, "error": kind, "message": text}`
    pub fn tool_error(tool: &str, kind: &str, message: &str) -> Self {
        Self {
            role: Role::Tool,
            content: json!({ "tool": tool, "error": kind, "message": message }).to_string(),
        }
    }
}

/// 追加式对话记录
#[derive(Clone, Debug, Default)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// 以唯一的用户消息开场
    pub fn start(user_input: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::user(user_input)],
        }
    }

    pub fn push(&mut self, msg: Message) {
        self.messages.push(msg);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_turn_encoding() {
        let ok = Message::tool_result("get_route", &json!({"index": 1}));
        assert_eq!(ok.role, Role::Tool);
        let v: Value = serde_json::from_str(&ok.content).unwrap();
        assert_eq!(v["tool"], "get_route");
        assert_eq!(v["result"]["index"], 1);

        let err = Message::tool_error("get_route", "not_found", "No route at index 40");
        let v: Value = serde_json::from_str(&err.content).unwrap();
        assert_eq!(v["error"], "not_found");
        assert!(v.get("result").is_none());
    }

    #[test]
    fn test_conversation_starts_with_user() {
        let mut c = Conversation::start("hi");
        c.push(Message::agent("hello"));
        assert_eq!(c.len(), 2);
        assert_eq!(c.messages()[0].role, Role::User);
        assert_eq!(c.into_messages()[1].content, "hello");
    }
}
