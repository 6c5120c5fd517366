// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 队列模块
///
/// 提供发现工作器与持久化工作器之间的有界结果队列
pub mod result_queue;
