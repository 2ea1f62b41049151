//! 路由描述符：对外可达操作的一条记录
//!
//! 序列化后的字段名（route / parameters / response）就是模型在系统提示词里看到的名字，不可随意改动。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 路由允许的 HTTP 方法
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    /// 大小写不敏感；其它方法（HEAD、OPTIONS 等）一律拒绝
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            other => Err(format!("Unsupported HTTP method: {}", other)),
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// 路由表中的一条：index 是模型唯一可依赖的稳定标识
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteDescriptor {
    pub index: usize,
    /// 路径模板，最多一个 `{xxx_id}` 占位符
    #[serde(rename = "route")]
    pub path_template: String,
    pub method: HttpMethod,
    pub description: String,
    /// 占位符名（按出现顺序），无占位符时为空
    #[serde(rename = "parameters")]
    pub parameter_names: Vec<String>,
    /// 返回 JSON 的 schema 片段
    #[serde(rename = "response")]
    pub response_shape: Value,
}

impl RouteDescriptor {
    /// 白名单匹配：方法相同、段数相同、字面段逐一相等、占位符段为 i64 范围内的十进制数字
    pub fn matches(&self, method: HttpMethod, path: &str) -> bool {
        if self.method != method {
            return false;
        }
        if !path.starts_with('/') || path.contains(['?', '#']) {
            return false;
        }
        let template: Vec<&str> = self.path_template.split('/').collect();
        let actual: Vec<&str> = path.split('/').collect();
        if template.len() != actual.len() {
            return false;
        }
        template.iter().zip(actual.iter()).all(|(t, a)| {
            if is_placeholder(t) {
                !a.is_empty() && a.bytes().all(|b| b.is_ascii_digit()) && a.parse::<i64>().is_ok()
            } else {
                t == a
            }
        })
    }
}

fn is_placeholder(segment: &str) -> bool {
    segment.len() > 2 && segment.starts_with('{') && segment.ends_with('}')
}

/// 从模板中提取占位符名，用于构建 parameter_names
pub fn placeholder_names(template: &str) -> Vec<String> {
    template
        .split('/')
        .filter(|s| is_placeholder(s))
        .map(|s| s[1..s.len() - 1].to_string())
        .collect()
}
