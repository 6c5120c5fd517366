// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 根区目录服务（root_directory_service）：抓取并解析根区列表页
/// - 提取服务（extraction_service）：从详情页中提取 WHOIS 服务器
pub mod extraction_service;
pub mod root_directory_service;
