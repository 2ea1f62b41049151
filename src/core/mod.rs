//! 核心层：错误、编排状态机、恢复策略、对话准入调度

pub mod error;
pub mod recovery;
pub mod state;
pub mod task_scheduler;

pub use error::{AgentError, ChatError};
pub use recovery::{RecoveryAction, RecoveryEngine};
pub use state::AgentPhase;
pub use task_scheduler::TaskScheduler;
