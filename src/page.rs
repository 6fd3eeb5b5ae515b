//! HTML rendering for the download page.
//!
//! The page is a single self-contained document: inline styles, one table
//! with a row per file, and a footer stamped with the generation time.

use chrono::{DateTime, Local};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::config::Config;
use crate::filesystem::FileRecord;
use crate::format::format_timestamp;

const STYLE: &str = r#"    * { margin: 0; padding: 0; box-sizing: border-box; font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif; }
    body { max-width: 1200px; margin: 2rem auto; padding: 0 1rem; background: #f5f7fa; }
    h1 { text-align: center; color: #2c3e50; margin-bottom: 2rem; font-size: 1.8rem; }
    table { width: 100%; border-collapse: collapse; background: #fff; border-radius: 8px; box-shadow: 0 2px 12px rgba(0,0,0,0.08); overflow: hidden; }
    th, td { padding: 1rem; text-align: left; border-bottom: 1px solid #eee; }
    th { background: #3498db; color: #fff; font-weight: 500; }
    tr:hover { background: #f8f9fa; }
    .download-btn { display: inline-block; padding: 0.4rem 0.8rem; background: #2ecc71; color: #fff; text-decoration: none; border-radius: 4px; transition: background 0.3s; }
    .download-btn:hover { background: #27ae60; }
    .empty { text-align: center; color: #95a5a6; font-style: italic; }
    .footer { text-align: center; margin-top: 2rem; color: #7f8c8d; font-size: 0.9rem; }
    @media (max-width: 768px) { th, td { padding: 0.8rem 0.5rem; } h1 { font-size: 1.5rem; } }"#;

/// Bytes left unencoded in a URL component: ASCII alphanumerics and
/// `-_.!~*'()`. Path separators are encoded.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Render the page with the footer stamped at the current time.
pub fn render(files: &[FileRecord], config: &Config) -> String {
    render_at(files, config, &Local::now())
}

pub fn render_at(files: &[FileRecord], config: &Config, generated_at: &DateTime<Local>) -> String {
    let page = Page { config };
    let labels = &config.labels;

    html! {
        (DOCTYPE)
        html lang=(page.text(&labels.lang)) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (page.text(&config.page_title)) }
                style { (PreEscaped(STYLE)) }
            }
            body {
                h1 { (page.text(&config.page_title)) }
                table {
                    thead {
                        tr {
                            th { (page.text(&labels.name)) }
                            th { (page.text(&labels.size)) }
                            th { (page.text(&labels.modified)) }
                            th { (page.text(&labels.action)) }
                        }
                    }
                    tbody {
                        @if files.is_empty() {
                            tr { td colspan="4" class="empty" { (page.text(&labels.empty)) } }
                        } @else {
                            @for file in files {
                                (page.row(file))
                            }
                        }
                    }
                }
                div class="footer" {
                    (page.text(&labels.footer)) (format_timestamp(generated_at))
                }
            }
        }
    }
    .into_string()
}

struct Page<'a> {
    config: &'a Config,
}

impl Page<'_> {
    /// Embed text as-is unless the config asks for escaping.
    fn text(&self, s: &str) -> Markup {
        if self.config.escape_names {
            html! { (s) }
        } else {
            PreEscaped(s.to_string())
        }
    }

    fn row(&self, file: &FileRecord) -> Markup {
        html! {
            tr {
                td { (self.text(&file.name)) }
                td { (file.size) }
                td { (file.mtime) }
                td { (self.download_link(file)) }
            }
        }
    }

    fn download_link(&self, file: &FileRecord) -> Markup {
        let config = self.config;
        if file.is_txt() {
            let href = format!(
                "{}/{}",
                config.txt_base_url,
                encode_uri_component(&file.name)
            );
            html! {
                a href=(href) class="download-btn" download=(self.text(&file.name)) {
                    (self.text(&config.labels.txt_download))
                }
            }
        } else {
            let href = format!(
                "{}/{}/{}",
                config.raw_base_url,
                config.raw_subpath,
                encode_uri_component(&file.relative_path)
            );
            html! {
                a href=(href) target="_blank" class="download-btn" {
                    (self.text(&config.labels.raw_download))
                }
            }
        }
    }
}

/// Percent-encode a single URL component, path separators included.
pub fn encode_uri_component(input: &str) -> String {
    utf8_percent_encode(input, COMPONENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(name: &str, relative_path: &str) -> FileRecord {
        FileRecord {
            name: name.to_string(),
            relative_path: relative_path.to_string(),
            size: "5 B".to_string(),
            mtime: "2024-05-01 12:00:00".to_string(),
        }
    }

    fn config() -> Config {
        Config {
            raw_base_url: "https://raw.example.org/main".to_string(),
            txt_base_url: "https://txt.example.org/doc".to_string(),
            page_title: "Downloads".to_string(),
            ..Config::default()
        }
    }

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).single().unwrap()
    }

    #[test]
    fn test_empty_list_renders_placeholder_row() {
        let config = config();
        let html = render_at(&[], &config, &fixed_time());
        assert_eq!(html.matches("<td").count(), 1);
        assert!(html.contains(r#"<td colspan="4" class="empty">暂无下载文件</td>"#));
        assert!(!html.contains("download-btn\""));
    }

    #[test]
    fn test_txt_link_uses_txt_base_and_save_hint() {
        let config = config();
        let html = render_at(&[record("Report.TXT", "Report.TXT")], &config, &fixed_time());
        assert!(html.contains(
            r#"<a href="https://txt.example.org/doc/Report.TXT" class="download-btn" download="Report.TXT">点击下载</a>"#
        ));
        assert!(!html.contains("target=\"_blank\""));
    }

    #[test]
    fn test_txt_link_uses_name_not_path() {
        let config = config();
        let html = render_at(&[record("a b.txt", "sub/a b.txt")], &config, &fixed_time());
        assert!(html.contains(r#"href="https://txt.example.org/doc/a%20b.txt""#));
    }

    #[test]
    fn test_raw_link_encodes_relative_path() {
        let config = config();
        let html = render_at(&[record("b.bin", "sub/b.bin")], &config, &fixed_time());
        assert!(html.contains(
            r#"<a href="https://raw.example.org/main/download/doc/sub%2Fb.bin" target="_blank" class="download-btn">立即下载</a>"#
        ));
    }

    #[test]
    fn test_one_row_per_file() {
        let config = config();
        let files = [
            record("a.txt", "a.txt"),
            record("b.bin", "sub/b.bin"),
            record("c.pdf", "c.pdf"),
        ];
        let html = render_at(&files, &config, &fixed_time());
        let body = html.split("<tbody>").nth(1).unwrap();
        assert_eq!(body.matches("<tr>").count(), 3);
        assert!(!html.contains("class=\"empty\""));
        for f in &files {
            assert!(html.contains(&format!("<td>{}</td>", f.name)));
        }
    }

    #[test]
    fn test_document_shell() {
        let config = config();
        let html = render_at(&[], &config, &fixed_time());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<html lang="zh-CN">"#));
        assert!(html.contains("<title>Downloads</title>"));
        assert!(html.contains("<h1>Downloads</h1>"));
        assert!(html.contains("<style>"));
        assert!(html.contains("2024-06-01 08:30:00"));
        assert!(!html.contains("<link"));
        assert!(!html.contains("<script"));
    }

    #[test]
    fn test_render_is_deterministic_for_fixed_time() {
        let config = config();
        let files = [record("a.txt", "a.txt"), record("b.bin", "sub/b.bin")];
        assert_eq!(
            render_at(&files, &config, &fixed_time()),
            render_at(&files, &config, &fixed_time())
        );
    }

    #[test]
    fn test_names_are_raw_by_default() {
        let config = config();
        let html = render_at(&[record("<b>.zip", "<b>.zip")], &config, &fixed_time());
        assert!(html.contains("<td><b>.zip</td>"));
        assert!(html.contains("%3Cb%3E.zip"));
    }

    #[test]
    fn test_escape_names_option() {
        let config = Config {
            escape_names: true,
            ..config()
        };
        let html = render_at(&[record("a&<b>.txt", "a&<b>.txt")], &config, &fixed_time());
        assert!(html.contains("<td>a&amp;&lt;b&gt;.txt</td>"));
        assert!(html.contains(r#"download="a&amp;&lt;b&gt;.txt""#));
        assert!(html.contains("a%26%3Cb%3E.txt"));
    }

    #[test]
    fn test_encode_uri_component() {
        assert_eq!(encode_uri_component("abc-_.!~*'()"), "abc-_.!~*'()");
        assert_eq!(encode_uri_component("a b"), "a%20b");
        assert_eq!(encode_uri_component("dir/file#1?.zip"), "dir%2Ffile%231%3F.zip");
        assert_eq!(encode_uri_component("100%"), "100%25");
        assert_eq!(encode_uri_component("文档.pdf"), "%E6%96%87%E6%A1%A3.pdf");
    }

    #[test]
    fn test_escape_names_covers_labels_and_title() {
        let mut config = Config {
            escape_names: true,
            page_title: "Q&A <files>".to_string(),
            ..config()
        };
        config.labels.empty = "<none>".to_string();

        let html = render_at(&[], &config, &fixed_time());
        assert!(html.contains("<title>Q&amp;A &lt;files&gt;</title>"));
        assert!(html.contains("<h1>Q&amp;A &lt;files&gt;</h1>"));
        assert!(html.contains(r#"class="empty">&lt;none&gt;</td>"#));
    }

    #[test]
    fn test_style_is_not_escaped() {
        let config = Config {
            escape_names: true,
            ..config()
        };
        let html = render_at(&[], &config, &fixed_time());
        assert!(html.contains(r#""Segoe UI""#));
        assert!(html.contains(".download-btn:hover"));
    }
}
