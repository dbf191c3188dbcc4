//! Markdown rendering with optional syntax highlighting

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::config::HighlightConfig;

/// Markdown renderer
pub struct MarkdownRenderer {
    highlighter: Option<Highlighter>,
}

/// Syntect state for fenced code blocks
struct Highlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    line_numbers: bool,
}

impl MarkdownRenderer {
    /// Create a renderer that emits plain `<pre><code>` blocks
    pub fn new() -> Self {
        Self { highlighter: None }
    }

    /// Create a renderer from the highlight configuration
    pub fn from_config(config: &HighlightConfig) -> Self {
        if !config.enable {
            return Self::new();
        }
        Self {
            highlighter: Some(Highlighter {
                syntax_set: SyntaxSet::load_defaults_newlines(),
                theme_set: ThemeSet::load_defaults(),
                theme_name: config.theme.clone(),
                line_numbers: config.line_number,
            }),
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        // Front-matter is handled separately in FrontMatter::parse()
        let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
        let parser = Parser::new_ext(markdown, options);

        let mut html_output = String::new();
        match &self.highlighter {
            None => html::push_html(&mut html_output, parser),
            Some(highlighter) => {
                html::push_html(&mut html_output, highlighter.rewrite(parser).into_iter())
            }
        }
        html_output
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    /// Replace every code block in the event stream with highlighted HTML
    fn rewrite<'a>(&self, parser: Parser<'a>) -> Vec<Event<'a>> {
        let mut events: Vec<Event> = Vec::new();
        let mut code_block: Option<(Option<String>, String)> = None;

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                        _ => None,
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, code)) = code_block.take() {
                        let highlighted = self.highlight_code(&code, lang.as_deref());
                        events.push(Event::Html(CowStr::from(highlighted)));
                    }
                }
                Event::Text(text) if code_block.is_some() => {
                    if let Some((_, code)) = code_block.as_mut() {
                        code.push_str(&text);
                    }
                }
                _ => events.push(event),
            }
        }

        events
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next());

        let highlighted = theme.and_then(|theme| {
            highlighted_html_for_string(code, &self.syntax_set, syntax, theme).ok()
        });

        match highlighted {
            Some(highlighted) if self.line_numbers => add_line_numbers(&highlighted, lang),
            Some(highlighted) => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                lang, highlighted
            ),
            None => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                lang,
                html_escape(code)
            ),
        }
    }
}

/// Add line numbers to highlighted code
fn add_line_numbers(code: &str, lang: &str) -> String {
    let lines: Vec<&str> = code.lines().collect();

    let gutter = (1..=lines.len())
        .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
        .collect::<Vec<_>>()
        .join("\n");
    let code_lines = lines.join("\n");

    format!(
        r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code"><pre>{}</pre></td></tr></table></figure>"#,
        lang, gutter, code_lines
    )
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
