// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工作器模块
///
/// 提供发现流水线的并发部分
/// 包括发现工作器、持久化工作器、完成屏障和流水线编排
pub mod barrier;
pub mod discovery_worker;
pub mod manager;
pub mod persistence_worker;

pub use barrier::CompletionBarrier;
pub use manager::{PipelineReport, WorkerManager};
