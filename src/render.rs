//! HTML page templates.
//!
//! Pages are assembled from [`Markup`] only. Plain strings become markup by
//! escaping; the one exception is the output of [`markdown_to_html`].

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use pulldown_cmark::{html, Event, Options, Parser};
use std::fmt;

const STYLESHEET: &str = "/css/style.css";

/// Bytes that would end or alter a single URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// HTML that can be spliced into a page as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup(String);

impl Markup {
    /// Escape text for element content.
    pub fn text(text: &str) -> Self {
        Self(escape(text, false))
    }

    /// Escape text for a double-quoted attribute value.
    pub fn attr(text: &str) -> Self {
        Self(escape(text, true))
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn escape(text: &str, quotes: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        let entity = match ch {
            '&' => "&amp;",
            '<' => "&lt;",
            '>' => "&gt;",
            '"' if quotes => "&quot;",
            '\'' if quotes => "&#39;",
            _ => {
                out.push(ch);
                continue;
            }
        };
        out.push_str(entity);
    }
    out
}

pub fn markdown_to_html(markdown: &str) -> Markup {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    // Raw HTML in a note is shown as text, never passed through.
    let events = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events);
    Markup(out)
}

/// `/prefix/{segment}` with the segment percent-encoded.
pub fn href(prefix: &str, segment: &str) -> String {
    format!("{prefix}{}", utf8_percent_encode(segment, PATH_SEGMENT))
}

pub fn document_page(title: &str, body: &Markup) -> String {
    let title = Markup::text(title);
    let content = Markup(format!("<h1>{title}</h1>\n<div>{body}</div>"));
    layout(&title, &content)
}

pub fn category_list_page<'a>(categories: impl IntoIterator<Item = &'a str>) -> String {
    let items = link_list(categories.into_iter().map(|name| ("/category/", name)));
    let content = Markup(format!("<h1>分類列表</h1>\n<ul>\n{items}</ul>"));
    layout(&Markup::text("分類"), &content)
}

pub fn category_page(category: &str, slugs: &[String]) -> String {
    let heading = Markup::text(&format!("{category} 的筆記"));
    let items = link_list(slugs.iter().map(|slug| ("/docs/", slug.as_str())));
    let content = Markup(format!("<h1>{heading}</h1>\n<ul>\n{items}</ul>"));
    layout(&heading, &content)
}

pub fn error_page(status: u16, message: &str) -> String {
    let heading = Markup::text(&format!("{status} {message}"));
    let content = Markup(format!("<h1>{heading}</h1>"));
    layout(&heading, &content)
}

fn link_list<'a>(links: impl Iterator<Item = (&'a str, &'a str)>) -> Markup {
    let items = links
        .map(|(prefix, name)| {
            format!(
                "<li><a href=\"{}\">{}</a></li>\n",
                Markup::attr(&href(prefix, name)),
                Markup::text(name)
            )
        })
        .collect();
    Markup(items)
}

fn layout(title: &Markup, content: &Markup) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="zh-TW">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="{STYLESHEET}">
</head>
<body>
    <div class="container">
{content}
    </div>
</body>
</html>
"#
    )
}
