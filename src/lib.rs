//! Pizzeria - 菜单服务与带白名单工具调用的对话智能体
//!
//! 模块划分：
//! - **agent**: 对话服务（准入、超时、取消、统一错误）与组件构建
//! - **catalog**: 路由表与 Schema 表（描述符表）
//! - **config**: 应用配置加载（TOML + 环境变量）
//! - **core**: 错误、编排状态机、恢复策略、对话准入
//! - **llm**: LLM 客户端抽象与实现（OpenAI 兼容 / Ollama / Mock）
//! - **memory**: 单次对话的轮次记录
//! - **menu**: 菜单模型、种子数据与只读路由
//! - **react**: Planner、system prompt、有界工具调用循环
//! - **server**: axum 路由（/health、/chat、菜单）
//! - **tools**: 五个工具与执行器

pub mod agent;
pub mod catalog;
pub mod config;
pub mod core;
pub mod llm;
pub mod memory;
pub mod menu;
pub mod observability;
pub mod react;
#[cfg(feature = "web")]
pub mod server;
pub mod tools;

pub use agent::{create_agent_components, AgentComponents, ChatService};
pub use catalog::Catalog;
pub use config::{load_config, AppConfig};
pub use core::{AgentError, ChatError};
