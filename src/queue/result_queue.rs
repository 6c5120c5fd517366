// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::WhoisResult;
use thiserror::Error;
use tokio::sync::mpsc;

/// 队列错误类型
#[derive(Error, Debug, PartialEq, Eq)]
pub enum QueueError {
    /// 消费端已关闭
    #[error("Queue closed")]
    Closed,
}

/// 创建有界结果队列
///
/// 多生产者、单消费者，先进先出。队列满时 `put` 挂起，
/// 空时 `get` 挂起；所有 `ResultSender` 被释放后队列关闭，
/// 消费端取完剩余结果后 `get` 返回 `None`。
///
/// # 参数
///
/// * `capacity` - 队列容量，必须大于 0
pub fn result_queue(capacity: usize) -> (ResultSender, ResultReceiver) {
    let (tx, rx) = mpsc::channel(capacity);
    (ResultSender { tx }, ResultReceiver { rx })
}

/// 结果队列的生产端
#[derive(Debug, Clone)]
pub struct ResultSender {
    tx: mpsc::Sender<WhoisResult>,
}

impl ResultSender {
    /// 入队结果，队列已满时等待空位
    ///
    /// # 返回值
    ///
    /// * `Ok(())` - 入队成功
    /// * `Err(QueueError::Closed)` - 消费端已释放
    pub async fn put(&self, result: WhoisResult) -> Result<(), QueueError> {
        self.tx.send(result).await.map_err(|_| QueueError::Closed)
    }

    /// 队列中尚未被取走的结果数
    pub fn pending(&self) -> usize {
        self.tx.max_capacity() - self.tx.capacity()
    }

    /// 队列容量
    pub fn capacity(&self) -> usize {
        self.tx.max_capacity()
    }
}

/// 结果队列的消费端
#[derive(Debug)]
pub struct ResultReceiver {
    rx: mpsc::Receiver<WhoisResult>,
}

impl ResultReceiver {
    /// 出队结果，队列为空时等待
    ///
    /// 所有生产端都已释放且队列为空时返回 `None`
    pub async fn get(&mut self) -> Option<WhoisResult> {
        self.rx.recv().await
    }

    /// 停止接收新结果，已缓冲的结果仍可取出
    pub fn close(&mut self) {
        self.rx.close();
    }
}
