// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::{DomainRecord, WhoisResult};
use crate::domain::services::extraction_service::{ExtractionService, WhoisExtraction};
use crate::engines::traits::{ScrapeRequest, ScraperEngine};
use crate::queue::result_queue::ResultSender;
use crate::utils::errors::WorkerError;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// 发现工作器
///
/// 每个根域记录对应一次 `run`：抓取详情页，提取 WHOIS 服务器，
/// 找到时将结果放入结果队列。抓取失败是致命错误，提取不到则静默跳过。
#[derive(Clone)]
pub struct DiscoveryWorker {
    engine: Arc<dyn ScraperEngine>,
    host: Url,
    timeout: Option<Duration>,
    sender: ResultSender,
}

impl DiscoveryWorker {
    pub fn new(engine: Arc<dyn ScraperEngine>, host: Url, sender: ResultSender) -> Self {
        Self {
            engine,
            host,
            timeout: None,
            sender,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// 发现单个根域的 WHOIS 服务器
    ///
    /// # 返回值
    ///
    /// * `Ok(Some(WhoisResult))` - 找到服务器
    /// * `Ok(None)` - 页面未公布服务器
    /// * `Err(WorkerError)` - 详情页地址无效或抓取失败
    pub async fn discover(&self, record: &DomainRecord) -> Result<Option<WhoisResult>, WorkerError> {
        let url = record
            .detail_url(&self.host)
            .map_err(|source| WorkerError::InvalidUrl {
                domain: record.name.clone(),
                source,
            })?;

        let request = ScrapeRequest::new(url.as_str()).with_timeout(self.timeout);
        let response = self
            .engine
            .scrape(&request)
            .await
            .map_err(|source| WorkerError::Fetch {
                domain: record.name.clone(),
                source,
            })?;
        debug!(
            domain = %record.name,
            status = response.status_code,
            content_type = %response.content_type,
            elapsed_ms = response.response_time_ms,
            "Detail page fetched"
        );

        match ExtractionService::extract_whois_server(&response.content) {
            WhoisExtraction::Found(server) => {
                metrics::counter!("tldwhois_whois_found_total").increment(1);
                debug!(domain = %record.name, server = %server, "WHOIS server found");
                Ok(Some(WhoisResult::new(record.name.clone(), server)))
            }
            WhoisExtraction::NoMarker => {
                metrics::counter!("tldwhois_whois_missing_total").increment(1);
                debug!(domain = %record.name, "No WHOIS server published");
                Ok(None)
            }
            WhoisExtraction::EmptyMarker => {
                metrics::counter!("tldwhois_whois_missing_total").increment(1);
                warn!(domain = %record.name, url = %url, "WHOIS label present without server text, skipping");
                Ok(None)
            }
        }
    }

    /// 运行工作器
    ///
    /// 找到结果时入队，队列已满则等待。每条记录至多产生一个结果。
    pub async fn run(&self, record: DomainRecord) -> Result<bool, WorkerError> {
        match self.discover(&record).await? {
            Some(result) => {
                self.sender
                    .put(result)
                    .await
                    .map_err(|_| WorkerError::QueueClosed)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
#[path = "discovery_worker_test.rs"]
mod tests;
