//! 编排层：Planner、system prompt、有界工具调用循环

pub mod loop_;
pub mod planner;
pub mod prompt;

pub use loop_::{react_loop, ReactResult, ReactSession};
pub use planner::{parse_llm_output, Planner, PlannerOutput, ToolCall};
pub use prompt::{system_instructions, DEFAULT_BASE_PROMPT};
