// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 根域记录（domain_record）：根区列表中的一行
/// - 发现结果（whois_result）：根域到 WHOIS 服务器的映射
pub mod domain_record;
pub mod whois_result;

pub use domain_record::DomainRecord;
pub use whois_result::WhoisResult;
