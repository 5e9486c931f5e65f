//! Page templating.
//!
//! Pages are rendered with Tera from templates embedded in the binary.
//! Autoescaping is off: metadata goes through the `esc` filter explicitly and
//! the Markdown body is inserted as-is.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_embed::RustEmbed;
use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::Config;
use crate::error::Result;
use crate::frontmatter::Metadata;

#[derive(RustEmbed)]
#[folder = "templates/"]
struct Templates;

const PAGE_TEMPLATE: &str = "page.html";
const UNTITLED: &str = "Untitled";
const INVALID_DATE: &str = "Invalid Date";

/// Escapes `& < > " '` for use in text nodes and quoted attributes.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    html_escape::encode_quoted_attribute(text)
}

fn esc_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let text = match value {
        Value::String(s) => escape_html(s).into_owned(),
        Value::Null => String::new(),
        other => escape_html(&other.to_string()).into_owned(),
    };
    Ok(Value::String(text))
}

/// Loads an embedded template source by file name.
pub(crate) fn embedded_template(name: &str) -> Result<String> {
    let file = Templates::get(name)
        .ok_or_else(|| tera::Error::msg(format!("embedded template `{name}` is missing")))?;
    let source = std::str::from_utf8(&file.data)
        .map_err(|e| tera::Error::chain(format!("embedded template `{name}` is not UTF-8"), e))?;
    Ok(source.to_string())
}

/// Formats a front matter date as `M/D/YYYY`.
///
/// Accepts RFC 3339 timestamps, plain `YYYY-MM-DD` dates and
/// `YYYY-MM-DD HH:MM:SS` date-times. Anything else yields `Invalid Date`.
pub fn format_date(raw: &str) -> String {
    let raw = raw.trim();
    let date = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").map(|dt| dt.date()));

    match date {
        Ok(d) => d.format("%-m/%-d/%Y").to_string(),
        Err(_) => INVALID_DATE.to_string(),
    }
}

/// Wraps rendered Markdown in the full HTML page.
pub struct PageRenderer {
    tera: Tera,
    footer: String,
    lang: String,
}

impl PageRenderer {
    pub fn new(config: &Config) -> Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.register_filter("esc", esc_filter);
        tera.add_raw_template(PAGE_TEMPLATE, &embedded_template(PAGE_TEMPLATE)?)?;

        Ok(PageRenderer {
            tera,
            footer: config.footer.clone(),
            lang: config.lang.clone(),
        })
    }

    /// Renders one page. `assets` is the relative path to the shared assets
    /// directory, e.g. `./assets` or `../../assets`.
    pub fn render(&self, body: &str, meta: &Metadata, assets: &str) -> Result<String> {
        let title = meta.title.as_deref().unwrap_or(UNTITLED);
        let description = non_empty(meta.description.as_deref());
        let author = non_empty(meta.author.as_deref());
        let date = non_empty(meta.date.as_deref()).map(format_date);
        let has_panel =
            description.is_some() || date.is_some() || author.is_some() || !meta.tags.is_empty();

        let mut ctx = Context::new();
        ctx.insert("lang", &self.lang);
        ctx.insert("title", title);
        ctx.insert("description", &description);
        ctx.insert("author", &author);
        ctx.insert("date", &date);
        ctx.insert("tags", &meta.tags);
        ctx.insert("has_panel", &has_panel);
        ctx.insert("assets", assets);
        ctx.insert("body", body);
        ctx.insert("footer", &self.footer);

        Ok(self.tera.render(PAGE_TEMPLATE, &ctx)?)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn renderer() -> PageRenderer {
        PageRenderer::new(&Config::default()).unwrap()
    }

    fn meta(title: Option<&str>) -> Metadata {
        Metadata {
            title: title.map(str::to_string),
            ..Metadata::default()
        }
    }

    #[test]
    fn minimal_page_structure() {
        let html = renderer().render("<p>Content</p>", &meta(Some("Test")), "./assets").unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<html lang=\"en\">"));
        assert!(html.contains("<meta charset=\"UTF-8\">"));
        assert!(html.contains(
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">"
        ));
        assert!(html.contains("<title>Test</title>"));
        assert!(html.contains("<header class=\"site-header\">"));
        assert!(html.contains("<main class=\"content\">"));
        assert!(html.contains("<footer class=\"site-footer\">"));
        assert!(html.contains("<p>Built with mdpress</p>"));
    }

    #[test]
    fn asset_links_use_the_prefix() {
        let html = renderer().render("", &Metadata::default(), "../../assets").unwrap();
        assert!(html.contains("<link rel=\"stylesheet\" href=\"../../assets/prism.css\">"));
        assert!(html.contains("<link rel=\"stylesheet\" href=\"../../assets/style.css\">"));
        assert!(html.contains("<script src=\"../../assets/prism.js\"></script>"));
    }

    #[test]
    fn missing_title_is_untitled() {
        let html = renderer().render("", &Metadata::default(), "./assets").unwrap();
        assert!(html.contains("<title>Untitled</title>"));
        assert!(html.contains("<h1 class=\"site-title\">Untitled</h1>"));
    }

    #[test]
    fn no_metadata_means_no_panel() {
        let html = renderer().render("<p>x</p>", &meta(Some("T")), "./assets").unwrap();
        assert!(!html.contains("class=\"metadata\""));
        assert!(!html.contains("<meta name=\"description\""));
        assert!(!html.contains("<meta name=\"author\""));
        assert!(!html.contains("<meta name=\"date\""));
    }

    #[test]
    fn full_metadata_panel_in_order() {
        let meta = Metadata {
            title: Some("Full".into()),
            description: Some("About things".into()),
            author: Some("Ada".into()),
            date: Some("2025-12-25".into()),
            tags: vec!["rust".into(), "ssg".into()],
            ..Metadata::default()
        };
        let html = renderer().render("", &meta, "./assets").unwrap();

        assert!(html.contains("<meta name=\"description\" content=\"About things\">"));
        assert!(html.contains("<meta name=\"author\" content=\"Ada\">"));
        assert!(html.contains("<meta name=\"date\" content=\"12/25/2025\">"));
        assert!(html.contains(
            "<strong>Tags:</strong> <span class=\"tag\">rust</span> <span class=\"tag\">ssg</span></div>"
        ));

        let order: Vec<usize> = ["Description:", "Date:", "Author:", "Tags:"]
            .iter()
            .map(|label| html.find(label).unwrap())
            .collect();
        let mut sorted = order.clone();
        sorted.sort();
        assert_eq!(order, sorted);
    }

    #[test]
    fn empty_strings_are_left_out() {
        let meta = Metadata {
            description: Some(String::new()),
            author: Some(String::new()),
            ..Metadata::default()
        };
        let html = renderer().render("", &meta, "./assets").unwrap();
        assert!(!html.contains("<meta name=\"description\""));
        assert!(!html.contains("class=\"metadata\""));
    }

    #[test]
    fn metadata_is_escaped_but_body_is_not() {
        let meta = Metadata {
            title: Some("Title with \"quotes\" & <brackets>".into()),
            author: Some("Author & Co.".into()),
            description: Some("It's <b>".into()),
            tags: vec!["<script>".into()],
            ..Metadata::default()
        };
        let html = renderer().render("<p>Trusted <em>body</em></p>", &meta, "./assets").unwrap();

        assert!(html.contains("<title>Title with &quot;quotes&quot; &amp; &lt;brackets&gt;</title>"));
        assert!(html.contains("Author &amp; Co."));
        assert!(html.contains("<span class=\"tag\">&lt;script&gt;</span>"));
        assert!(!html.contains("It's"));
        assert!(html.contains("<p>Trusted <em>body</em></p>"));
    }

    #[test]
    fn escape_covers_the_five_characters() {
        assert_eq!(
            escape_html(r#"& < > " '"#),
            "&amp; &lt; &gt; &quot; &#x27;"
        );
    }

    #[test]
    fn dates_in_several_shapes() {
        assert_eq!(format_date("2025-08-05"), "8/5/2025");
        assert_eq!(format_date("2025-12-25T10:30:00Z"), "12/25/2025");
        assert_eq!(format_date("2024-02-29 08:00:00"), "2/29/2024");
    }

    #[test]
    fn unparseable_date_degrades() {
        let meta = Metadata {
            date: Some("someday".into()),
            ..Metadata::default()
        };
        let html = renderer().render("", &meta, "./assets").unwrap();
        assert!(html.contains("<strong>Date:</strong> Invalid Date"));
    }
}
