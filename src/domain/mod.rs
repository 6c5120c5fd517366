// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：根域记录与 WHOIS 发现结果
/// - 服务（services）：根区列表解析与 WHOIS 服务器提取
///
/// 领域层只处理已经取回的页面内容，不直接发起网络请求。
pub mod models;
pub mod services;
