//! 短期记忆：单次请求内的对话轮次（无跨请求记忆）

pub mod conversation;

pub use conversation::{Conversation, Message, Role};
