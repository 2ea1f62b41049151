//! 恢复策略：工具失败后是回喂给模型还是终止本次对话
//!
//! 模型自己的输入错误（下标越界、未知属性、白名单拒绝、参数不合法）写成 tool-result 让模型自行纠正；
//! 环境故障（回环请求失败、响应非 JSON、超时）不重试，直接上抛到对话服务。

use crate::core::AgentError;
use crate::tools::ToolError;

#[derive(Debug, Clone, PartialEq)]
pub enum RecoveryAction {
    /// 作为 tool-result 写回对话：(错误类别, 说明)
    FeedBack { kind: &'static str, message: String },
    /// 终止本次编排
    Escalate(AgentError),
}

#[derive(Debug, Default, Clone)]
pub struct RecoveryEngine;

impl RecoveryEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, tool: &str, err: ToolError) -> RecoveryAction {
        if err.is_model_fault() {
            tracing::info!(tool = %tool, kind = err.kind(), error = %err, "feeding tool error back to model");
            RecoveryAction::FeedBack {
                kind: err.kind(),
                message: err.to_string(),
            }
        } else {
            tracing::warn!(tool = %tool, kind = err.kind(), error = %err, "escalating tool failure");
            RecoveryAction::Escalate(AgentError::ToolFailed {
                tool: tool.to_string(),
                source: err,
            })
        }
    }
}
