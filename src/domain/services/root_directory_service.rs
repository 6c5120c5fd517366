// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::DomainRecord;
use crate::domain::services::extraction_service::first_child_text;
use crate::engines::traits::{ScrapeRequest, ScraperEngine};
use crate::utils::errors::LoaderError;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

static ROW: Lazy<Selector> = Lazy::new(|| selector("#tld-table > tbody > tr"));
static NAME_LINK: Lazy<Selector> = Lazy::new(|| selector("td:nth-of-type(1) > span > a"));
static TYPE_CELL: Lazy<Selector> = Lazy::new(|| selector("td:nth-of-type(2)"));
static MANAGER_CELL: Lazy<Selector> = Lazy::new(|| selector("td:nth-of-type(3)"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid root directory selector")
}

/// 根区目录服务
///
/// 在并发流水线启动前抓取一次根区列表页，逐行转换为 `DomainRecord`
pub struct RootDirectoryService {
    engine: Arc<dyn ScraperEngine>,
    url: String,
    timeout: Option<Duration>,
}

impl RootDirectoryService {
    pub fn new(engine: Arc<dyn ScraperEngine>, url: impl Into<String>) -> Self {
        Self {
            engine,
            url: url.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// 加载根区列表
    ///
    /// 抓取失败或任意一行结构不完整时返回错误，不跳过畸形行
    pub async fn load(&self) -> Result<Vec<DomainRecord>, LoaderError> {
        info!(url = %self.url, engine = self.engine.name(), "Fetching root zone directory");

        let request = ScrapeRequest::new(self.url.clone()).with_timeout(self.timeout);
        let response = self.engine.scrape(&request).await?;

        let records = Self::parse_listing(&response.content)?;
        metrics::counter!("tldwhois_domains_loaded_total").increment(records.len() as u64);
        info!(
            count = records.len(),
            status = response.status_code,
            elapsed_ms = response.response_time_ms,
            "Root zone directory loaded"
        );

        Ok(records)
    }

    /// 解析根区列表页
    ///
    /// 输出顺序与页面中行的顺序一致，不排序也不去重
    pub fn parse_listing(html_content: &str) -> Result<Vec<DomainRecord>, LoaderError> {
        let document = Html::parse_document(html_content);

        document
            .select(&ROW)
            .enumerate()
            .map(|(index, row)| Self::parse_row(index, row))
            .collect()
    }

    fn parse_row(index: usize, row: ElementRef<'_>) -> Result<DomainRecord, LoaderError> {
        let malformed = |field| LoaderError::MalformedRow { row: index, field };

        let link = row.select(&NAME_LINK).next().ok_or_else(|| malformed("name"))?;
        let name = first_child_text(link).ok_or_else(|| malformed("name"))?;
        let detail_path = link.value().attr("href").ok_or_else(|| malformed("href"))?;

        let domain_type = row
            .select(&TYPE_CELL)
            .next()
            .and_then(first_child_text)
            .ok_or_else(|| malformed("type"))?;

        let manager = row
            .select(&MANAGER_CELL)
            .next()
            .and_then(first_child_text)
            .ok_or_else(|| malformed("manager"))?;

        debug!(row = index, domain = name, "Parsed root zone row");
        Ok(DomainRecord::new(name, detail_path, domain_type, manager))
    }
}

#[cfg(test)]
#[path = "root_directory_service_test.rs"]
mod tests;
