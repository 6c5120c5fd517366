// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

/// 详情页中 "WHOIS Server:" 标签所在的节点
pub const WHOIS_MARKER_SELECTOR: &str = "#main_right > p:nth-of-type(2) > b:nth-of-type(2)";

static WHOIS_MARKER: Lazy<Selector> =
    Lazy::new(|| Selector::parse(WHOIS_MARKER_SELECTOR).expect("valid WHOIS marker selector"));

/// WHOIS 服务器提取结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WhoisExtraction {
    /// 找到服务器，已去除首尾空白
    Found(String),
    /// 页面中没有标签节点，该根域未公布 WHOIS 服务器
    NoMarker,
    /// 标签节点存在，但其后没有非空文本
    EmptyMarker,
}

/// 提取服务
///
/// 负责从根域详情页中提取 WHOIS 服务器
pub struct ExtractionService;

impl ExtractionService {
    /// 从详情页 HTML 中提取 WHOIS 服务器
    ///
    /// 定位标签节点后读取紧随其后的文本节点
    pub fn extract_whois_server(html_content: &str) -> WhoisExtraction {
        let document = Html::parse_document(html_content);
        Self::extract_from_document(&document)
    }

    pub fn extract_from_document(document: &Html) -> WhoisExtraction {
        let marker = match document.select(&WHOIS_MARKER).next() {
            Some(marker) => marker,
            None => return WhoisExtraction::NoMarker,
        };

        match next_sibling_text(marker).map(str::trim) {
            Some(server) if !server.is_empty() => WhoisExtraction::Found(server.to_string()),
            _ => WhoisExtraction::EmptyMarker,
        }
    }
}

/// 元素的第一个子节点文本，子节点不是文本时返回 `None`
pub fn first_child_text<'a>(element: ElementRef<'a>) -> Option<&'a str> {
    element
        .first_child()
        .and_then(|node| node.value().as_text())
        .map(|text| &**text)
}

/// 紧随元素之后的兄弟文本节点
pub fn next_sibling_text<'a>(element: ElementRef<'a>) -> Option<&'a str> {
    element
        .next_sibling()
        .and_then(|node| node.value().as_text())
        .map(|text| &**text)
}
