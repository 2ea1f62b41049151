//! 编排状态机
//!
//! AwaitingModel →(工具请求) ExecutingTool →(结果写回) AwaitingModel … →(最终文本) Done
//! 任意阶段的环境故障或超出轮数上限 → Failed。Done / Failed 为终态。

use crate::core::AgentError;
use crate::react::ToolCall;

#[derive(Debug, Clone, PartialEq)]
pub enum AgentPhase {
    AwaitingModel,
    ExecutingTool(ToolCall),
    Done(String),
    Failed(AgentError),
}

impl AgentPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, AgentPhase::Done(_) | AgentPhase::Failed(_))
    }

    /// 日志用的阶段名
    pub fn label(&self) -> &'static str {
        match self {
            AgentPhase::AwaitingModel => "awaiting_model",
            AgentPhase::ExecutingTool(_) => "executing_tool",
            AgentPhase::Done(_) => "done",
            AgentPhase::Failed(_) => "failed",
        }
    }
}
