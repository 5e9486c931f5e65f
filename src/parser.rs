use pulldown_cmark::{html, CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use crate::highlight::CodeBlockRenderer;

fn markdown_options() -> Options {
    // smart punctuation stays off so quotes in the source survive as typed
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
}

/// Renders a Markdown body to an HTML fragment.
///
/// Code blocks are collected and handed to `code_blocks` instead of going
/// through pulldown-cmark's own `<pre><code>` output.
pub fn render_markdown(md: &str, code_blocks: &dyn CodeBlockRenderer) -> String {
    let parser = Parser::new_ext(md, markdown_options());

    let mut events = Vec::new();
    let mut code = String::new();
    let mut lang: Option<String> = None;
    let mut in_code_block = false;

    for event in parser {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                in_code_block = true;
                code.clear();
                lang = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .map(str::to_string),
                    CodeBlockKind::Indented => None,
                };
            }
            Event::End(TagEnd::CodeBlock) if in_code_block => {
                in_code_block = false;
                let rendered = code_blocks.render_code_block(&code, lang.as_deref());
                events.push(Event::Html(rendered.into()));
            }
            Event::Text(text) if in_code_block => code.push_str(&text),
            _ if in_code_block => {}
            other => events.push(other),
        }
    }

    let mut html_output = String::new();
    html::push_html(&mut html_output, events.into_iter());
    html_output
}
