// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::Settings;
use crate::domain::models::DomainRecord;
use crate::domain::services::root_directory_service::RootDirectoryService;
use crate::engines::traits::ScraperEngine;
use crate::queue::result_queue::result_queue;
use crate::utils::errors::{PipelineError, WorkerError};
use crate::workers::barrier::CompletionBarrier;
use crate::workers::discovery_worker::DiscoveryWorker;
use crate::workers::persistence_worker::{PersistenceReport, PersistenceWorker, ProgressWriter};
use chrono::{DateTime, Local};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinHandle;
use tracing::{error, info};
use url::Url;

/// 一次完整运行的汇总
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    /// 根区列表中的根域数量
    pub domains: usize,
    /// 写入输出文件的结果数
    pub persisted: u64,
    /// 输出文件路径
    pub output_path: PathBuf,
}

/// 工作管理器
///
/// 编排整条发现流水线：加载根区列表，启动持久化工作器，
/// 为每个根域启动一个发现工作器，等待完成屏障释放后
/// 再等待持久化工作器排空队列。
pub struct WorkerManager {
    settings: Settings,
    engine: Arc<dyn ScraperEngine>,
    progress: ProgressWriter,
    started_at: DateTime<Local>,
}

impl WorkerManager {
    pub fn new(settings: Settings, engine: Arc<dyn ScraperEngine>) -> Self {
        Self {
            settings,
            engine,
            progress: Box::new(tokio::io::stdout()),
            started_at: Local::now(),
        }
    }

    /// 替换进度行输出目标
    pub fn with_progress(mut self, progress: ProgressWriter) -> Self {
        self.progress = progress;
        self
    }

    /// 指定进程启动时间，用于输出文件名
    pub fn with_started_at(mut self, started_at: DateTime<Local>) -> Self {
        self.started_at = started_at;
        self
    }

    /// 输出文件路径
    pub fn output_path(&self) -> PathBuf {
        PersistenceWorker::output_path(
            &self.settings.output.directory(),
            &self.settings.output.file_prefix,
            self.started_at,
        )
    }

    /// 运行流水线
    ///
    /// 根区列表抓取失败时在创建输出文件之前返回；任一详情页抓取失败时
    /// 终止其余工作器并返回该错误，已写入的行保留在磁盘上。
    pub async fn run(self) -> Result<PipelineReport, PipelineError> {
        let host = Url::parse(&self.settings.source.host)
            .map_err(|e| PipelineError::Config(format!("invalid source host: {}", e)))?;
        let timeout = self.settings.source.timeout();
        let output_path = self.output_path();

        let records = RootDirectoryService::new(self.engine.clone(), self.settings.source.root_db_url())
            .with_timeout(timeout)
            .load()
            .await?;
        let domains = records.len();

        let (sender, receiver) = result_queue(self.settings.pipeline.queue_capacity);
        let consumer = PersistenceWorker::open(output_path, receiver, self.progress)
            .await?
            .start();

        let worker = DiscoveryWorker::new(self.engine.clone(), host, sender).with_timeout(timeout);
        let limiter = self
            .settings
            .pipeline
            .max_concurrent_workers
            .map(|limit| Arc::new(Semaphore::new(limit)));

        let barrier = CompletionBarrier::new();
        let (fatal_tx, mut fatal_rx) = mpsc::channel::<WorkerError>(1);
        let handles = Self::start_workers(records, &worker, &barrier, limiter, fatal_tx);
        info!(workers = handles.len(), "Discovery workers launched");

        // The queue closes once the last worker releases its sender.
        drop(worker);

        let fatal = tokio::select! {
            _ = barrier.wait() => fatal_rx.try_recv().ok(),
            Some(err) = fatal_rx.recv() => Some(err),
        };

        if let Some(err) = fatal {
            for handle in &handles {
                handle.abort();
            }
            let err = Self::fatal_cause(err, consumer).await;
            error!(error = %err, "Discovery aborted");
            return Err(err);
        }

        for handle in handles {
            handle.await?;
        }
        info!("All discovery workers finished");

        let report = consumer.await??;
        info!(
            domains,
            persisted = report.processed,
            path = %report.path.display(),
            "Discovery complete"
        );

        Ok(PipelineReport {
            domains,
            persisted: report.processed,
            output_path: report.path,
        })
    }

    /// 确定致命错误的根因
    ///
    /// 队列关闭只会发生在持久化工作器退出之后，此时返回其自身的错误；
    /// 其余情况终止持久化工作器并返回工作器错误。
    async fn fatal_cause(
        err: WorkerError,
        consumer: JoinHandle<Result<PersistenceReport, WorkerError>>,
    ) -> PipelineError {
        if !matches!(err, WorkerError::QueueClosed) {
            consumer.abort();
            return err.into();
        }

        match consumer.await {
            Ok(Err(cause)) => cause.into(),
            Err(join) => join.into(),
            Ok(Ok(_)) => err.into(),
        }
    }

    fn start_workers(
        records: Vec<DomainRecord>,
        worker: &DiscoveryWorker,
        barrier: &CompletionBarrier,
        limiter: Option<Arc<Semaphore>>,
        fatal_tx: mpsc::Sender<WorkerError>,
    ) -> Vec<JoinHandle<()>> {
        records
            .into_iter()
            .map(|record| {
                let guard = barrier.register();
                let worker = worker.clone();
                let limiter = limiter.clone();
                let fatal_tx = fatal_tx.clone();

                tokio::spawn(async move {
                    let _guard = guard;
                    let _permit = match limiter {
                        Some(limiter) => limiter.acquire_owned().await.ok(),
                        None => None,
                    };

                    if let Err(e) = worker.run(record).await {
                        let _ = fatal_tx.try_send(e);
                    }
                })
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "manager_test.rs"]
mod tests;
