//! 应用配置：从 config/default.toml 与环境变量加载
//!
//! 加载顺序：先读 TOML 文件，再用环境变量 `PIZZERIA__*` 覆盖（双下划线表示嵌套，如 `PIZZERIA__LLM__PROVIDER=mock`）。

use std::path::PathBuf;

use serde::Deserialize;

/// 应用配置根（对应 config/default.toml 的顶层）
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub app: AppSection,
    pub server: ServerSection,
    pub llm: LlmSection,
    pub agent: AgentSection,
    pub tools: ToolsSection,
}

/// [app] 段
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppSection {
    pub name: String,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            name: "pizzeria".to_string(),
        }
    }
}

/// [server] 段：监听地址、对话准入上限与单次对话超时
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
    /// 同时进行的对话上限；菜单路由（回环调用目标）不受此限制
    pub max_concurrent_chats: usize,
    pub chat_timeout_secs: u64,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 9002,
            max_concurrent_chats: 16,
            chat_timeout_secs: 120,
        }
    }
}

/// [llm] 段：后端选择与超时
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSection {
    /// ollama / openai / mock
    pub provider: String,
    pub model: String,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub timeouts: LlmTimeoutsSection,
}

impl Default for LlmSection {
    fn default() -> Self {
        Self {
            provider: "ollama".to_string(),
            model: "llama3.2:latest".to_string(),
            base_url: None,
            api_key: None,
            timeouts: LlmTimeoutsSection::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmTimeoutsSection {
    /// 单次模型调用超时（秒）
    pub request: u64,
}

impl Default for LlmTimeoutsSection {
    fn default() -> Self {
        Self { request: 60 }
    }
}

/// [agent] 段：编排循环上限与系统提示词
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AgentSection {
    /// 每次对话最多执行的工具调用轮数
    pub max_steps: usize,
    /// 基础系统提示词文件，未设置或读取失败时使用内置文本
    pub system_prompt_path: Option<PathBuf>,
}

impl Default for AgentSection {
    fn default() -> Self {
        Self {
            max_steps: 10,
            system_prompt_path: None,
        }
    }
}

/// [tools] 段：工具超时、回环地址、白名单开关
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ToolsSection {
    /// 单次工具调用超时（秒）
    pub tool_timeout_secs: u64,
    /// invoke_route 的 HTTP 超时（秒）
    pub http_timeout_secs: u64,
    /// 回环调用地址；未设置时用服务实际绑定地址
    pub loopback_base_url: Option<String>,
    pub enforce_route_allowlist: bool,
}

impl Default for ToolsSection {
    fn default() -> Self {
        Self {
            tool_timeout_secs: 30,
            http_timeout_secs: 15,
            loopback_base_url: None,
            enforce_route_allowlist: true,
        }
    }
}

/// 从 config 目录加载配置，环境变量 PIZZERIA__* 可覆盖
///
/// 1. 按顺序查找 config/default.toml、../config/default.toml，找到则作为第一源
/// 2. 若传入 config_path 且文件存在，则追加该文件（可覆盖前面的键）
/// 3. 最后叠加环境变量 PIZZERIA__*（双下划线表示嵌套键）
pub fn load_config(config_path: Option<PathBuf>) -> Result<AppConfig, config::ConfigError> {
    let mut builder = config::Config::builder();

    for name in ["config/default", "../config/default"] {
        let path = format!("{}.toml", name);
        if std::path::Path::new(&path).exists() {
            builder = builder.add_source(config::File::with_name(name).required(false));
            break;
        }
    }

    if let Some(ref path) = config_path {
        if path.exists() {
            builder = builder.add_source(config::File::from(path.clone()).required(false));
        }
    }

    builder = builder.add_source(
        config::Environment::with_prefix("PIZZERIA")
            .separator("__")
            .try_parsing(true),
    );

    builder.build()?.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let c = AppConfig::default();
        assert_eq!(c.server.port, 9002);
        assert_eq!(c.llm.provider, "ollama");
        assert_eq!(c.agent.max_steps, 10);
        assert!(c.tools.enforce_route_allowlist);
    }

    #[test]
    fn test_load_explicit_file_overrides_defaults() {
        let mut f = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            f,
            "[server]\nport = 9100\n\n[agent]\nmax_steps = 3\n\n[llm]\nprovider = \"mock\"\n\n[llm.timeouts]\nrequest = 5\n"
        )
        .unwrap();
        let c = load_config(Some(f.path().to_path_buf())).unwrap();
        assert_eq!(c.server.port, 9100);
        assert_eq!(c.server.host, "127.0.0.1");
        assert_eq!(c.agent.max_steps, 3);
        assert_eq!(c.llm.provider, "mock");
        assert_eq!(c.llm.timeouts.request, 5);
        assert_eq!(c.tools.tool_timeout_secs, 30);
    }
}
