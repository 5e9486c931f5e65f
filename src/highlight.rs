//! Build-time syntax highlighting for fenced code blocks.

use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::template::escape_html;
use crate::theme::Theme;

/// Class prefix for highlighted tokens, keeps them clear of the page styles.
const TOKEN_CLASS_PREFIX: &str = "tok-";

/// Turns the contents of a code block into HTML.
///
/// The Markdown renderer hands every fenced or indented code block to one of
/// these. `lang` is `None` when the block carries no language tag.
pub trait CodeBlockRenderer {
    fn render_code_block(&self, source: &str, lang: Option<&str>) -> String;
}

/// Highlighter configuration for one build.
///
/// Built once from the selected theme and passed by reference into every
/// Markdown render, so all pages of a build share it.
pub struct Highlighter {
    syntax_set: SyntaxSet,
    theme: Theme,
}

impl Highlighter {
    pub fn new(theme: Theme) -> Self {
        Highlighter {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    fn syntax_for(&self, lang: &str) -> Option<&SyntaxReference> {
        self.syntax_set.find_syntax_by_token(lang)
    }

    fn highlight(&self, source: &str, syntax: &SyntaxReference) -> Result<String, syntect::Error> {
        let mut generator = ClassedHTMLGenerator::new_with_class_style(
            syntax,
            &self.syntax_set,
            ClassStyle::SpacedPrefixed {
                prefix: TOKEN_CLASS_PREFIX,
            },
        );
        for line in LinesWithEndings::from(source) {
            generator.parse_html_for_line_which_includes_newline(line)?;
        }
        Ok(generator.finalize())
    }
}

impl CodeBlockRenderer for Highlighter {
    fn render_code_block(&self, source: &str, lang: Option<&str>) -> String {
        let known = lang.and_then(|l| self.syntax_for(l).map(|syntax| (l, syntax)));
        if let Some((lang, syntax)) = known {
            match self.highlight(source, syntax) {
                Ok(tokens) => {
                    let lang = escape_html(lang);
                    return format!(
                        "<pre class=\"language-{lang}\"><code class=\"language-{lang}\">{tokens}</code></pre>"
                    );
                }
                Err(e) => log::warn!("Syntax highlighting failed for `{lang}` block: {e}"),
            }
        }
        plain_code_block(source)
    }
}

/// Unhighlighted fallback used for unknown or missing languages.
pub fn plain_code_block(source: &str) -> String {
    format!("<pre><code>{}</code></pre>", escape_html(source))
}
