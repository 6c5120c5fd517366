// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::EngineError;
use thiserror::Error;

/// 根区列表加载错误类型
#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("抓取根区列表失败: {0}")]
    Fetch(#[from] EngineError),

    #[error("根区列表第 {row} 行缺少字段: {field}")]
    MalformedRow { row: usize, field: &'static str },
}

/// Worker错误类型
#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("抓取 {domain} 详情页失败: {source}")]
    Fetch {
        domain: String,
        #[source]
        source: EngineError,
    },

    #[error("{domain} 的详情页地址无效: {source}")]
    InvalidUrl {
        domain: String,
        #[source]
        source: url::ParseError,
    },

    #[error("结果队列已关闭")]
    QueueClosed,

    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),
}

/// 流水线错误类型
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error(transparent)]
    Loader(#[from] LoaderError),

    #[error(transparent)]
    Worker(#[from] WorkerError),

    #[error("任务异常退出: {0}")]
    Join(#[from] tokio::task::JoinError),
}
