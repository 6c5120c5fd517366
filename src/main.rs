// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use chrono::Local;
use std::sync::Arc;
use tldwhois::config::settings::Settings;
use tldwhois::engines::reqwest_engine::ReqwestEngine;
use tldwhois::utils::telemetry;
use tldwhois::workers::WorkerManager;
use tracing::info;

/// 主函数
///
/// 应用程序入口点：加载配置，抓取根区列表，并发发现每个根域的 WHOIS 服务器
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let started_at = Local::now();

    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting tldwhois...");

    // 2. Load configuration
    let settings = Settings::new()?;
    info!(host = %settings.source.host, queue_capacity = settings.pipeline.queue_capacity, "Configuration loaded");

    // 3. Initialize engine
    let engine = Arc::new(ReqwestEngine::new(&settings.source.user_agent)?);

    // 4. Run the discovery pipeline
    let report = WorkerManager::new(settings, engine)
        .with_started_at(started_at)
        .run()
        .await?;

    info!(
        domains = report.domains,
        persisted = report.persisted,
        path = %report.output_path.display(),
        "Finished"
    );

    Ok(())
}
