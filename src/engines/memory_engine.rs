// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::{EngineError, ScrapeRequest, ScrapeResponse, ScraperEngine};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// 测试用的内存抓取引擎（用于单元测试）
///
/// 按URL返回预先登记的页面；未登记的URL返回 404 错误
#[derive(Default)]
pub struct InMemoryEngine {
    pages: HashMap<String, String>,
    failures: HashMap<String, u16>,
    delay: Option<Duration>,
    requests: AtomicUsize,
}

impl InMemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记一个页面
    pub fn with_page(mut self, url: impl Into<String>, content: impl Into<String>) -> Self {
        self.pages.insert(url.into(), content.into());
        self
    }

    /// 登记一个返回错误状态码的URL
    pub fn with_failure(mut self, url: impl Into<String>, status: u16) -> Self {
        self.failures.insert(url.into(), status);
        self
    }

    /// 每次抓取前等待的时间
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// 已处理的请求数
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ScraperEngine for InMemoryEngine {
    async fn scrape(&self, request: &ScrapeRequest) -> Result<ScrapeResponse, EngineError> {
        self.requests.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(status) = self.failures.get(&request.url) {
            return Err(EngineError::HttpStatus {
                url: request.url.clone(),
                status: *status,
            });
        }

        match self.pages.get(&request.url) {
            Some(content) => Ok(ScrapeResponse {
                status_code: 200,
                content: content.clone(),
                content_type: "text/html".to_string(),
                response_time_ms: 0,
            }),
            None => Err(EngineError::HttpStatus {
                url: request.url.clone(),
                status: 404,
            }),
        }
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
