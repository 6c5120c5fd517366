// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// 完成屏障
///
/// 记录尚未结束的发现工作器数量。`register` 返回的守卫在释放时
/// 完成注销，因此正常返回、静默跳过和 panic 都会计入完成。
#[derive(Debug, Clone, Default)]
pub struct CompletionBarrier {
    state: Arc<BarrierState>,
}

#[derive(Debug, Default)]
struct BarrierState {
    outstanding: AtomicUsize,
    notify: Notify,
}

/// 屏障守卫，释放时注销一个工作器
#[derive(Debug)]
#[must_use = "dropping the guard immediately marks the worker as done"]
pub struct BarrierGuard {
    state: Arc<BarrierState>,
}

impl CompletionBarrier {
    pub fn new() -> Self {
        Self::default()
    }

    /// 在工作器启动前登记
    pub fn register(&self) -> BarrierGuard {
        self.state.outstanding.fetch_add(1, Ordering::SeqCst);
        BarrierGuard {
            state: self.state.clone(),
        }
    }

    /// 尚未结束的工作器数量
    pub fn outstanding(&self) -> usize {
        self.state.outstanding.load(Ordering::SeqCst)
    }

    /// 等待所有已登记的工作器结束
    pub async fn wait(&self) {
        loop {
            let notified = self.state.notify.notified();
            tokio::pin!(notified);
            // Register interest before reading the counter so a concurrent
            // final `done` cannot slip between the check and the await.
            notified.as_mut().enable();

            if self.outstanding() == 0 {
                return;
            }
            notified.await;
        }
    }
}

impl Drop for BarrierGuard {
    fn drop(&mut self) {
        if self.state.outstanding.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.state.notify.notify_waiters();
        }
    }
}
