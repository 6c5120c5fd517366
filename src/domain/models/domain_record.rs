// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::url_utils::resolve_url;
use serde::{Deserialize, Serialize};
use url::{ParseError, Url};

/// 根域记录
///
/// 根区列表页中的一行。所有字段都按页面上显示的原文保存，
/// 创建后不再修改，由分派到的发现工作器独占。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRecord {
    /// 根域名称，如 `.com`
    pub name: String,
    /// 详情页相对路径，取自列表中链接的 href
    pub detail_path: String,
    /// 根域类型，如 generic、country-code
    pub domain_type: String,
    /// 管理机构
    pub manager: String,
}

impl DomainRecord {
    pub fn new(
        name: impl Into<String>,
        detail_path: impl Into<String>,
        domain_type: impl Into<String>,
        manager: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            detail_path: detail_path.into(),
            domain_type: domain_type.into(),
            manager: manager.into(),
        }
    }

    /// 以数据源主机为基准解析详情页的绝对地址
    pub fn detail_url(&self, host: &Url) -> Result<Url, ParseError> {
        resolve_url(host, &self.detail_path)
    }
}
