//! 有界工具调用循环
//!
//! 每一轮：调用模型 → 最终文本则结束；工具请求则执行并把结果写回对话，再调用模型。
//! 至多执行 max_steps 次工具；模型在用满之后再请求工具，本次对话以 ToolLoopExceeded 失败，
//! 所以模型最多被调用 max_steps + 1 次。格式错误的工具请求同样计入轮数。

use crate::core::{AgentError, AgentPhase, RecoveryAction, RecoveryEngine};
use crate::memory::{Conversation, Message};
use crate::react::{parse_llm_output, Planner, PlannerOutput};
use crate::tools::ToolExecutor;

/// 解析失败时写回对话所用的工具名
const PARSE_TOOL_NAME: &str = "tool_call";

/// 循环结果：最终回复、完整轮次、实际执行的工具次数
#[derive(Debug)]
pub struct ReactResult {
    pub response: String,
    pub messages: Vec<Message>,
    pub tool_calls: usize,
}

/// 一次编排所需的组件
pub struct ReactSession<'a> {
    pub planner: &'a Planner,
    pub executor: &'a ToolExecutor,
    pub recovery: &'a RecoveryEngine,
    pub max_steps: usize,
}

impl<'a> ReactSession<'a> {
    pub fn new(
        planner: &'a Planner,
        executor: &'a ToolExecutor,
        recovery: &'a RecoveryEngine,
        max_steps: usize,
    ) -> Self {
        Self {
            planner,
            executor,
            recovery,
            max_steps,
        }
    }
}

/// 模型输出 → 下一阶段
fn after_model_output(
    output: &str,
    conversation: &mut Conversation,
    tool_calls: &mut usize,
    max_steps: usize,
) -> AgentPhase {
    match parse_llm_output(output) {
        Ok(PlannerOutput::Response(text)) => {
            conversation.push(Message::agent(text.clone()));
            AgentPhase::Done(text)
        }
        Ok(PlannerOutput::ToolCall(_)) | Err(_) if *tool_calls >= max_steps => {
            tracing::warn!(max_steps, "tool call limit reached");
            AgentPhase::Failed(AgentError::ToolLoopExceeded { max_steps })
        }
        Ok(PlannerOutput::ToolCall(call)) => {
            conversation.push(Message::agent(call.to_turn()));
            AgentPhase::ExecutingTool(call)
        }
        Err(e) => {
            *tool_calls += 1;
            tracing::info!(error = %e, "model produced an invalid tool call");
            conversation.push(Message::agent(output.trim()));
            conversation.push(Message::tool_error(PARSE_TOOL_NAME, e.kind(), &e.to_string()));
            AgentPhase::AwaitingModel
        }
    }
}

pub async fn react_loop(session: &ReactSession<'_>, user_input: &str) -> Result<ReactResult, AgentError> {
    let mut conversation = Conversation::start(user_input);
    let mut phase = AgentPhase::AwaitingModel;
    let mut tool_calls = 0usize;

    loop {
        tracing::debug!(phase = phase.label(), tool_calls, "react step");

        phase = match phase {
            AgentPhase::AwaitingModel => match session.planner.plan(&conversation).await {
                Ok(output) => after_model_output(&output, &mut conversation, &mut tool_calls, session.max_steps),
                Err(e) => AgentPhase::Failed(e),
            },
            AgentPhase::ExecutingTool(call) => {
                tool_calls += 1;
                match session.executor.execute(&call.tool, call.args.clone()).await {
                    Ok(result) => {
                        conversation.push(Message::tool_result(&call.tool, &result));
                        AgentPhase::AwaitingModel
                    }
                    Err(err) => match session.recovery.handle(&call.tool, err) {
                        RecoveryAction::FeedBack { kind, message } => {
                            conversation.push(Message::tool_error(&call.tool, kind, &message));
                            AgentPhase::AwaitingModel
                        }
                        RecoveryAction::Escalate(e) => AgentPhase::Failed(e),
                    },
                }
            }
            AgentPhase::Done(response) => {
                tracing::info!(tool_calls, turns = conversation.len(), "react loop done");
                return Ok(ReactResult {
                    response,
                    messages: conversation.into_messages(),
                    tool_calls,
                });
            }
            AgentPhase::Failed(e) => {
                tracing::warn!(tool_calls, error = %e, "react loop failed");
                return Err(e);
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::llm::{LlmError, Scripted, ScriptedLlmClient};
    use crate::memory::Role;
    use crate::tools::{menu_registry, InvokeRouteTool};
    use std::sync::Arc;
    use std::time::Duration;

    fn parts(llm: Arc<ScriptedLlmClient>) -> (Planner, ToolExecutor, RecoveryEngine) {
        let catalog = Arc::new(Catalog::menu());
        let invoke = InvokeRouteTool::new("http://127.0.0.1:1", catalog.clone(), 2);
        let executor = ToolExecutor::new(menu_registry(catalog, invoke), 5);
        let planner = Planner::new(llm, "SYSTEM", Duration::from_secs(5));
        (planner, executor, RecoveryEngine::new())
    }

    #[tokio::test]
    async fn test_direct_answer_without_tools() {
        let llm = Arc::new(ScriptedLlmClient::new(["Hello! Ask me about pizza."]));
        let (planner, executor, recovery) = parts(llm.clone());
        let session = ReactSession::new(&planner, &executor, &recovery, 3);
        let out = react_loop(&session, "hi").await.unwrap();
        assert_eq!(out.response, "Hello! Ask me about pizza.");
        assert_eq!(out.tool_calls, 0);
        assert_eq!(out.messages.len(), 2);
        assert_eq!(llm.calls(), 1);
    }

    #[tokio::test]
    async fn test_catalog_lookup_then_answer() {
        let llm = Arc::new(ScriptedLlmClient::new([
            r#"{"tool": "get_route", "args": {"index": 1}}"#,
            "The sizes route is /pizza/get_pizza_sizes.",
        ]));
        let (planner, executor, recovery) = parts(llm.clone());
        let session = ReactSession::new(&planner, &executor, &recovery, 3);
        let out = react_loop(&session, "which route lists sizes?").await.unwrap();

        let roles: Vec<Role> = out.messages.iter().map(|m| m.role.clone()).collect();
        assert_eq!(roles, vec![Role::User, Role::Agent, Role::Tool, Role::Agent]);
        let tool_turn: serde_json::Value = serde_json::from_str(&out.messages[2].content).unwrap();
        assert_eq!(tool_turn["tool"], "get_route");
        assert_eq!(tool_turn["result"]["route"], "/pizza/get_pizza_sizes");
        assert_eq!(out.tool_calls, 1);
    }

    #[tokio::test]
    async fn test_out_of_range_index_is_fed_back() {
        let llm = Arc::new(ScriptedLlmClient::new([
            r#"{"tool": "get_schema", "args": {"index": 99}}"#,
            "Sorry, I could not find that.",
        ]));
        let (planner, executor, recovery) = parts(llm.clone());
        let session = ReactSession::new(&planner, &executor, &recovery, 3);
        let out = react_loop(&session, "schema 99?").await.unwrap();
        let tool_turn: serde_json::Value = serde_json::from_str(&out.messages[2].content).unwrap();
        assert_eq!(tool_turn["error"], "not_found");

        // 第二次模型调用能看到错误轮次
        let second = llm.request(1).unwrap();
        assert!(second.iter().any(|m| m.content.contains("not_found")));
    }

    #[tokio::test]
    async fn test_loop_limit_counts_executions() {
        let llm = Arc::new(ScriptedLlmClient::repeating(r#"{"tool": "get_route", "args": {"index": 0}}"#));
        let (planner, executor, recovery) = parts(llm.clone());
        let session = ReactSession::new(&planner, &executor, &recovery, 2);
        let err = react_loop(&session, "loop forever").await.unwrap_err();
        assert_eq!(err, AgentError::ToolLoopExceeded { max_steps: 2 });
        assert_eq!(llm.calls(), 3);
    }

    #[tokio::test]
    async fn test_invalid_tool_call_counts_toward_limit() {
        let llm = Arc::new(ScriptedLlmClient::repeating(r#"{"tool": "get_route", "args": "#));
        let (planner, executor, recovery) = parts(llm.clone());
        let session = ReactSession::new(&planner, &executor, &recovery, 1);
        let err = react_loop(&session, "broken").await.unwrap_err();
        assert_eq!(err, AgentError::ToolLoopExceeded { max_steps: 1 });
        assert_eq!(llm.calls(), 2);
        let second = llm.request(1).unwrap();
        assert!(second.iter().any(|m| m.content.contains("invalid_tool_call")));
    }

    #[tokio::test]
    async fn test_transport_failure_escalates() {
        let llm = Arc::new(ScriptedLlmClient::new([
            r#"{"tool": "invoke_route", "args": {"method": "GET", "path": "/pizza/get_pizza_sizes"}}"#,
        ]));
        let (planner, executor, recovery) = parts(llm.clone());
        let session = ReactSession::new(&planner, &executor, &recovery, 3);
        let err = react_loop(&session, "sizes?").await.unwrap_err();
        assert!(matches!(err, AgentError::ToolFailed { ref tool, .. } if tool == "invoke_route"));
        assert_eq!(llm.calls(), 1);
    }

    #[tokio::test]
    async fn test_model_failure_ends_loop() {
        let llm = Arc::new(ScriptedLlmClient::new(Vec::<String>::new()));
        llm.push(Scripted::Fail(LlmError::Unavailable("connection refused".into())));
        let (planner, executor, recovery) = parts(llm);
        let session = ReactSession::new(&planner, &executor, &recovery, 3);
        let err = react_loop(&session, "hi").await.unwrap_err();
        assert!(matches!(err, AgentError::ModelUnavailable(_)));
    }
}
