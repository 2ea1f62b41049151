//! 对话服务
//!
//! create_agent_components 从配置构建 Planner / ToolExecutor / Recovery，进程内只构建一次并以 Arc 共享；
//! ChatService 负责准入、超时、取消与耗时日志，把一切失败统一成 ChatError。

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::task::AbortHandle;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::config::{AppConfig, ServerSection};
use crate::core::{AgentError, ChatError, RecoveryEngine, TaskScheduler};
use crate::llm::{create_llm_from_config, LlmClient};
use crate::react::{react_loop, system_instructions, Planner, ReactResult, ReactSession, DEFAULT_BASE_PROMPT};
use crate::tools::{menu_registry, InvokeRouteTool, ToolExecutor};

/// 连通性探测用的系统提示词与输入（不带工具）
const SELF_CHECK_SYSTEM_PROMPT: &str = "You are a helpful assistant that only outputs the text \"test\".";
const SELF_CHECK_MESSAGE: &str = "Who are you?";

/// 预构建的编排组件，可被所有对话共享
pub struct AgentComponents {
    pub planner: Planner,
    pub executor: ToolExecutor,
    pub recovery: RecoveryEngine,
    pub max_steps: usize,
    pub catalog: Arc<Catalog>,
    /// self_check() 使用的无工具 Planner
    pub self_check_planner: Planner,
}

/// 基础提示词：[agent].system_prompt_path 指向的文件，读不到时用内置文本
fn load_base_prompt(cfg: &AppConfig) -> String {
    match cfg.agent.system_prompt_path.as_ref() {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => DEFAULT_BASE_PROMPT.to_string(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "system prompt file unreadable, using built-in prompt");
                DEFAULT_BASE_PROMPT.to_string()
            }
        },
        None => DEFAULT_BASE_PROMPT.to_string(),
    }
}

/// 用配置选择的 LLM 构建组件；bound_base_url 为服务实际监听地址（[tools].loopback_base_url 优先）
pub fn create_agent_components(cfg: &AppConfig, bound_base_url: &str) -> AgentComponents {
    create_agent_components_with_llm(cfg, bound_base_url, create_llm_from_config(cfg))
}

/// 同上，但由调用方提供 LLM（测试里注入 ScriptedLlmClient）
pub fn create_agent_components_with_llm(
    cfg: &AppConfig,
    bound_base_url: &str,
    llm: Arc<dyn LlmClient>,
) -> AgentComponents {
    let catalog = Arc::new(Catalog::menu());
    let base_url = cfg
        .tools
        .loopback_base_url
        .clone()
        .unwrap_or_else(|| bound_base_url.to_string());

    let invoke = InvokeRouteTool::new(base_url, catalog.clone(), cfg.tools.http_timeout_secs)
        .with_allowlist(cfg.tools.enforce_route_allowlist);
    tracing::info!(
        base_url = invoke.base_url(),
        allowlist = cfg.tools.enforce_route_allowlist,
        "invoke_route configured"
    );
    if !cfg.tools.enforce_route_allowlist {
        tracing::warn!("route allowlist disabled: invoke_route will call any path on the loopback host");
    }

    let registry = menu_registry(catalog.clone(), invoke);
    let system_prompt = system_instructions(&load_base_prompt(cfg), &catalog, &registry);
    let model_timeout = Duration::from_secs(cfg.llm.timeouts.request);

    AgentComponents {
        planner: Planner::new(llm.clone(), system_prompt, model_timeout),
        executor: ToolExecutor::new(registry, cfg.tools.tool_timeout_secs),
        recovery: RecoveryEngine::new(),
        max_steps: cfg.agent.max_steps,
        catalog,
        self_check_planner: Planner::new(llm, SELF_CHECK_SYSTEM_PROMPT, model_timeout),
    }
}

/// 对单条用户输入跑一次有界编排
pub async fn process_message(components: &AgentComponents, user_input: &str) -> Result<ReactResult, AgentError> {
    let session = ReactSession::new(
        &components.planner,
        &components.executor,
        &components.recovery,
        components.max_steps,
    );
    react_loop(&session, user_input).await
}

async fn process_self_check(components: &AgentComponents) -> Result<ReactResult, AgentError> {
    let session = ReactSession::new(&components.self_check_planner, &components.executor, &components.recovery, 0);
    react_loop(&session, SELF_CHECK_MESSAGE).await
}

#[derive(Clone, Copy)]
enum ChatKind {
    User,
    SelfCheck,
}

/// 对话服务：准入 → 独立任务内编排（超时 / 取消）→ 统一错误
#[derive(Clone)]
pub struct ChatService {
    components: Arc<AgentComponents>,
    scheduler: Arc<TaskScheduler>,
    chat_timeout: Duration,
    cancel: CancellationToken,
}

impl ChatService {
    pub fn new(components: Arc<AgentComponents>, server: &ServerSection) -> Self {
        Self {
            components,
            scheduler: Arc::new(TaskScheduler::new(server.max_concurrent_chats)),
            chat_timeout: Duration::from_secs(server.chat_timeout_secs),
            cancel: CancellationToken::new(),
        }
    }

    /// 绑定进程级关闭令牌：令牌取消后，进行中的对话以 Cancelled 结束
    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn scheduler(&self) -> &TaskScheduler {
        &self.scheduler
    }

    pub fn components(&self) -> &AgentComponents {
        &self.components
    }

    pub async fn chat(&self, message: &str) -> Result<String, ChatError> {
        self.run_logged(ChatKind::User, message).await
    }

    /// 连通性探测：固定提示词、无工具
    pub async fn self_check(&self) -> Result<String, ChatError> {
        self.run_logged(ChatKind::SelfCheck, SELF_CHECK_MESSAGE).await
    }

    async fn run_logged(&self, kind: ChatKind, message: &str) -> Result<String, ChatError> {
        let request_id = Uuid::new_v4();
        let started = Instant::now();
        tracing::info!(%request_id, chars = message.chars().count(), "chat started");

        let outcome = self.run(kind, message).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &outcome {
            Ok(_) => tracing::info!(%request_id, elapsed_ms, "chat completed"),
            Err(e) => tracing::warn!(%request_id, elapsed_ms, error = %e, "chat failed"),
        }
        outcome.map_err(ChatError::from)
    }

    async fn run(&self, kind: ChatKind, message: &str) -> Result<String, AgentError> {
        let permit = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Err(AgentError::Cancelled),
            permit = self.scheduler.acquire_chat() => permit?,
        };

        let components = Arc::clone(&self.components);
        let input = message.to_string();
        let chat_timeout = self.chat_timeout;
        // 超时在任务内部生效：调用方被丢弃时任务与许可证也会在超时后结束
        let handle = tokio::spawn(async move {
            let _permit = permit;
            let work = async {
                match kind {
                    ChatKind::User => process_message(&components, &input).await,
                    ChatKind::SelfCheck => process_self_check(&components).await,
                }
            };
            match tokio::time::timeout(chat_timeout, work).await {
                Ok(result) => result,
                Err(_) => Err(AgentError::Timeout(chat_timeout)),
            }
        });
        // 调用方（如断开的 HTTP 连接）被丢弃时立即中止任务
        let _guard = AbortOnDrop(handle.abort_handle());

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(AgentError::Cancelled),
            joined = handle => match joined {
                Ok(result) => result.map(|r| r.response),
                Err(join_err) => Err(AgentError::Internal(format!("chat task failed: {}", join_err))),
            },
        }
    }
}

/// 离开作用域时中止对话任务；任务已结束时无副作用
struct AbortOnDrop(AbortHandle);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}
