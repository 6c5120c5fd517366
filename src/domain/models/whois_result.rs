// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;

/// WHOIS 发现结果
///
/// 只有在详情页中成功提取到服务器时才会构造，
/// 经由结果队列按值传递给持久化工作器。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhoisResult {
    /// 根域名称，与 `DomainRecord::name` 一致
    pub domain: String,
    /// 去除首尾空白后的 WHOIS 服务器
    pub whois_server: String,
}

impl WhoisResult {
    pub fn new(domain: impl Into<String>, whois_server: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            whois_server: whois_server.into(),
        }
    }

    /// 输出文件中的一行，包含结尾换行符
    pub fn to_line(&self) -> String {
        format!("{}\n", self)
    }

    /// 标准输出上的进度行，计数补零到 6 位
    pub fn progress_line(&self, count: u64) -> String {
        format!("|{:06}| {} | {}\n", count, self.domain, self.whois_server)
    }
}

impl fmt::Display for WhoisResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.domain, self.whois_server)
    }
}
