// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::queue::result_queue::ResultReceiver;
use crate::utils::errors::WorkerError;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// 进度行输出目标
pub type ProgressWriter = Box<dyn AsyncWrite + Send + Unpin>;

/// 持久化结果汇总
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistenceReport {
    /// 写入的结果数
    pub processed: u64,
    /// 输出文件路径
    pub path: PathBuf,
}

/// 持久化工作器
///
/// 结果队列唯一的消费者，独占输出文件和处理计数。
/// 每条结果单独写入并刷新，进程中途退出时已写入的行仍保留在磁盘上。
pub struct PersistenceWorker {
    receiver: ResultReceiver,
    file: File,
    path: PathBuf,
    progress: ProgressWriter,
}

impl PersistenceWorker {
    /// 输出文件路径，文件名中嵌入进程启动时间
    ///
    /// 形如 `<dir>/WHOIS_20240101120000.txt`
    pub fn output_path(directory: &Path, prefix: &str, started_at: DateTime<Local>) -> PathBuf {
        directory.join(format!(
            "{}_{}.txt",
            prefix,
            started_at.format("%Y%m%d%H%M%S")
        ))
    }

    /// 打开输出文件（不存在则创建，存在则追加）
    ///
    /// # 参数
    ///
    /// * `path` - 输出文件路径
    /// * `receiver` - 结果队列消费端
    /// * `progress` - 进度行输出目标，通常为标准输出
    pub async fn open(
        path: PathBuf,
        receiver: ResultReceiver,
        progress: ProgressWriter,
    ) -> Result<Self, WorkerError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;
        info!(path = %path.display(), "Output file opened");

        Ok(Self {
            receiver,
            file,
            path,
            progress,
        })
    }

    /// 运行工作器
    ///
    /// 持续取出结果直到队列关闭，随后刷新并关闭输出文件
    pub async fn run(mut self) -> Result<PersistenceReport, WorkerError> {
        let mut processed: u64 = 0;

        while let Some(result) = self.receiver.get().await {
            processed += 1;

            self.file.write_all(result.to_line().as_bytes()).await?;
            self.file.flush().await?;

            self.progress
                .write_all(result.progress_line(processed).as_bytes())
                .await?;
            self.progress.flush().await?;

            metrics::counter!("tldwhois_results_persisted_total").increment(1);
            debug!(count = processed, domain = %result.domain, "Result persisted");
        }

        self.file.sync_all().await?;
        drop(self.file);
        info!(processed, path = %self.path.display(), "Result queue drained, output file closed");

        Ok(PersistenceReport {
            processed,
            path: self.path,
        })
    }

    /// 启动后台运行
    pub fn start(self) -> JoinHandle<Result<PersistenceReport, WorkerError>> {
        tokio::spawn(self.run())
    }
}

#[cfg(test)]
#[path = "persistence_worker_test.rs"]
mod tests;
