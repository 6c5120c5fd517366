// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含根域记录、发现结果以及页面解析服务
pub mod domain;

/// 引擎模块
///
/// 实现页面抓取引擎
pub mod engines;

/// 队列模块
///
/// 实现发现工作器与持久化工作器之间的有界结果队列
pub mod queue;

/// 工具模块
///
/// 提供错误类型、日志初始化等通用功能
pub mod utils;

/// 工作器模块
///
/// 实现并发发现、结果持久化和完成屏障
pub mod workers;
