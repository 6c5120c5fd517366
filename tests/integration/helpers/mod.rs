// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tldwhois::config::settings::Settings;
use tokio::io::AsyncWrite;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// 测试用的根域：名称、类型、WHOIS 服务器
pub type TldFixture<'a> = (&'a str, &'a str, Option<&'a str>);

/// 可克隆的进度输出缓冲区
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn lines(&self) -> Vec<String> {
        String::from_utf8(self.0.lock().unwrap().clone())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl AsyncWrite for SharedBuffer {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<std::io::Result<usize>> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

pub fn listing_page(tlds: &[TldFixture<'_>]) -> String {
    let rows: String = tlds
        .iter()
        .map(|(name, domain_type, _)| {
            format!(
                r#"
                <tr>
                    <td><span class="domain tld"><a href="/domains/root/db/{0}.html">{0}</a></span></td>
                    <td>{1}</td>
                    <td>{0} Registry Operator</td>
                </tr>"#,
                name, domain_type
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
        <html>
            <head><title>Root Zone Database</title></head>
            <body>
                <div id="main_right">
                    <h1>Root Zone Database</h1>
                    <table id="tld-table" class="iana-table">
                        <thead><tr><th>Domain</th><th>Type</th><th>TLD Manager</th></tr></thead>
                        <tbody>{}</tbody>
                    </table>
                </div>
            </body>
        </html>"#,
        rows
    )
}

pub fn detail_page(name: &str, server: Option<&str>) -> String {
    let whois = server
        .map(|s| format!("<br>\n<b>WHOIS Server:</b> {}\n", s))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
        <html>
            <body>
                <div id="main_right">
                    <h1>Delegation Record for .{0}</h1>
                    <h2>Sponsoring Organisation</h2>
                    <p><b>{0} Registry Operator</b></p>
                    <h2>Registry Information</h2>
                    <p>
                        <b>URL for registration services:</b> <a href="http://nic.{0}">http://nic.{0}</a>{1}
                    </p>
                </div>
            </body>
        </html>"#,
        name, whois
    )
}

/// 启动模拟的根区数据库站点
pub async fn start_root_zone_server(tlds: &[TldFixture<'_>]) -> MockServer {
    let server = MockServer::start().await;

    mount_listing(&server, tlds).await;
    for (name, _, whois) in tlds {
        mount_detail(&server, name, *whois).await;
    }

    server
}

pub async fn mount_listing(server: &MockServer, tlds: &[TldFixture<'_>]) {
    Mock::given(method("GET"))
        .and(path("/domains/root/db"))
        .respond_with(html_response(listing_page(tlds)))
        .mount(server)
        .await;
}

pub async fn mount_detail(server: &MockServer, name: &str, whois: Option<&str>) {
    Mock::given(method("GET"))
        .and(path(format!("/domains/root/db/{}.html", name)))
        .respond_with(html_response(detail_page(name, whois)))
        .mount(server)
        .await;
}

fn html_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/html; charset=utf-8")
        .set_body_string(body)
}

pub fn settings_for(host: &str, output_dir: &std::path::Path) -> Settings {
    let mut settings = Settings::default();
    settings.source.host = host.to_string();
    settings.output.directory = output_dir.to_string_lossy().to_string();
    settings
}
