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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// 默认数据源主机
pub const DEFAULT_HOST: &str = "https://www.iana.org";
/// 根区数据库列表页路径
pub const DEFAULT_ROOT_DB_PATH: &str = "/domains/root/db";
/// 结果队列默认容量
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// 应用程序配置设置
///
/// 包含数据源、流水线并发和输出文件等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 数据源配置
    pub source: SourceSettings,
    /// 流水线配置
    pub pipeline: PipelineSettings,
    /// 输出配置
    pub output: OutputSettings,
}

/// 数据源配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct SourceSettings {
    /// 数据源主机，详情页相对路径拼接在其后
    pub host: String,
    /// 根区列表页路径
    pub root_db_path: String,
    /// 请求使用的 User-Agent
    pub user_agent: String,
    /// 单次请求超时时间（秒），未设置时不超时
    pub timeout_secs: Option<u64>,
}

/// 流水线配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineSettings {
    /// 结果队列容量
    pub queue_capacity: usize,
    /// 同时运行的发现工作器上限，未设置时不限制
    pub max_concurrent_workers: Option<usize>,
}

/// 输出配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    /// 输出目录
    pub directory: String,
    /// 输出文件名前缀
    pub file_prefix: String,
}

impl SourceSettings {
    /// 根区列表页的完整 URL
    pub fn root_db_url(&self) -> String {
        format!("{}{}", self.host.trim_end_matches('/'), self.root_db_path)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl OutputSettings {
    pub fn directory(&self) -> PathBuf {
        PathBuf::from(&self.directory)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source: SourceSettings {
                host: DEFAULT_HOST.to_string(),
                root_db_path: DEFAULT_ROOT_DB_PATH.to_string(),
                user_agent: default_user_agent(),
                timeout_secs: None,
            },
            pipeline: PipelineSettings {
                queue_capacity: DEFAULT_QUEUE_CAPACITY,
                max_concurrent_workers: None,
            },
            output: OutputSettings {
                directory: ".".to_string(),
                file_prefix: "WHOIS".to_string(),
            },
        }
    }
}

fn default_user_agent() -> String {
    format!("tldwhois/{}", env!("CARGO_PKG_VERSION"))
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载内置默认值、配置文件和环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败或取值不合法
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Start with default settings
            .set_default("source.host", DEFAULT_HOST)?
            .set_default("source.root_db_path", DEFAULT_ROOT_DB_PATH)?
            .set_default("source.user_agent", default_user_agent())?
            // Default pipeline settings
            .set_default("pipeline.queue_capacity", DEFAULT_QUEUE_CAPACITY as i64)?
            // Default output settings
            .set_default("output.directory", ".")?
            .set_default("output.file_prefix", "WHOIS")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("TLDWHOIS").separator("__"));

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// 校验配置取值
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pipeline.queue_capacity == 0 {
            return Err(ConfigError::Message(
                "pipeline.queue_capacity must be at least 1".to_string(),
            ));
        }
        if self.pipeline.max_concurrent_workers == Some(0) {
            return Err(ConfigError::Message(
                "pipeline.max_concurrent_workers must be at least 1 when set".to_string(),
            ));
        }
        if url::Url::parse(&self.source.host).is_err() {
            return Err(ConfigError::Message(format!(
                "source.host is not a valid URL: {}",
                self.source.host
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
