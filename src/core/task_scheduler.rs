//! 任务调度：对话准入
//!
//! 入站对话用 Semaphore 限制并发；invoke_route 的回环请求打到菜单路由，不占用对话许可，
//! 因此对话池饱和时回环调用也不会因为等待自己的许可而死锁。

use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::core::AgentError;

pub struct TaskScheduler {
    chat_semaphore: Arc<Semaphore>,
    capacity: usize,
}

impl TaskScheduler {
    pub fn new(max_concurrent_chats: usize) -> Self {
        let capacity = max_concurrent_chats.max(1);
        Self {
            chat_semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// 获取对话许可（排队等待）；只有信号量被关闭时才失败
    pub async fn acquire_chat(&self) -> Result<OwnedSemaphorePermit, AgentError> {
        self.chat_semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| AgentError::Internal("chat scheduler closed".to_string()))
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 当前空闲许可数
    pub fn available(&self) -> usize {
        self.chat_semaphore.available_permits()
    }
}

impl Default for TaskScheduler {
    fn default() -> Self {
        Self::new(16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_permits_are_released_on_drop() {
        let s = TaskScheduler::new(2);
        let a = s.acquire_chat().await.unwrap();
        let _b = s.acquire_chat().await.unwrap();
        assert_eq!(s.available(), 0);
        drop(a);
        assert_eq!(s.available(), 1);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        assert_eq!(TaskScheduler::new(0).capacity(), 1);
    }
}
