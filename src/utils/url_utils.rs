// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::{ParseError, Url};

/// 将详情页路径解析为绝对URL
///
/// 根区列表中的链接是以 `/` 开头的站内路径，直接拼接在数据源主机之后，
/// 主机自带的路径前缀（如镜像站点的 `/iana`）保留。已是绝对地址的链接原样返回。
pub fn resolve_url(host: &Url, path: &str) -> Result<Url, ParseError> {
    match Url::parse(path) {
        Err(ParseError::RelativeUrlWithoutBase) => Url::parse(&format!(
            "{}/{}",
            host.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )),
        other => other,
    }
}
