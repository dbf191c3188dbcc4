//! Placeholder templates
//!
//! Templates are plain HTML files with `{{name}}` tokens. Rendering replaces
//! the first occurrence of each token named in a [`Context`] and leaves
//! everything else alone; there is no expression language and no escaping.

use indexmap::{IndexMap, IndexSet};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::content::Post;
use crate::error::{BuildError, Result};

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\{\{([A-Za-z_][A-Za-z0-9_]*)\}\}").unwrap();
}

pub const LAYOUT_TEMPLATE: &str = "layout.html";
pub const POST_TEMPLATE: &str = "post.html";
pub const INDEX_TEMPLATE: &str = "index.html";

/// Placeholder name to substitution value
#[derive(Debug, Clone, Default)]
pub struct Context {
    vars: IndexMap<String, String>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }
}

/// A raw template string
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    source: String,
}

impl Template {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Read a template file
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|source| BuildError::MissingTemplate {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(name, source))
    }

    /// Substitute placeholders in a single pass.
    ///
    /// Only the first occurrence of each name in `context` is replaced.
    /// Substituted values are never scanned for further placeholders.
    pub fn render(&self, context: &Context) -> String {
        let mut used: HashSet<String> = HashSet::new();
        let rendered = PLACEHOLDER.replace_all(&self.source, |caps: &Captures| {
            let name = &caps[1];
            match context.get(name) {
                Some(value) if used.insert(name.to_string()) => value.to_string(),
                _ => caps[0].to_string(),
            }
        });

        let leftover = unresolved(&self.source, context);
        if !leftover.is_empty() {
            tracing::debug!("{}: left unresolved: {}", self.name, leftover.join(", "));
        }

        rendered.into_owned()
    }
}

/// Placeholder names in `source` that `context` does not supply
fn unresolved(source: &str, context: &Context) -> Vec<String> {
    let names: IndexSet<String> = PLACEHOLDER
        .captures_iter(source)
        .map(|caps| caps[1].to_string())
        .filter(|name| context.get(name).is_none())
        .collect();
    names.into_iter().collect()
}

/// The layout, post and index templates for one build
pub struct TemplateRenderer {
    layout: Template,
    post: Template,
    index: Template,
    styles_path: String,
}

impl TemplateRenderer {
    /// Load `layout.html`, `post.html` and `index.html` from a directory
    pub fn load(templates_dir: &Path, styles_path: &str) -> Result<Self> {
        Ok(Self::from_templates(
            Template::load(&templates_dir.join(LAYOUT_TEMPLATE))?,
            Template::load(&templates_dir.join(POST_TEMPLATE))?,
            Template::load(&templates_dir.join(INDEX_TEMPLATE))?,
            styles_path,
        ))
    }

    pub fn from_templates(
        layout: Template,
        post: Template,
        index: Template,
        styles_path: &str,
    ) -> Self {
        Self {
            layout,
            post,
            index,
            styles_path: styles_path.to_string(),
        }
    }

    /// Render one post page wrapped in the layout
    pub fn render_post(&self, post: &Post) -> String {
        let mut context = Context::new();
        context
            .insert("title", post.title_or_empty())
            .insert("date", post.date_or_empty())
            .insert("content", post.content.as_str());

        self.wrap(self.post.render(&context))
    }

    /// Render the index page wrapped in the layout
    pub fn render_index(&self, posts: &[Post]) -> String {
        let mut context = Context::new();
        context.insert("posts", post_list_html(posts));

        self.wrap(self.index.render(&context))
    }

    fn wrap(&self, content: String) -> String {
        let mut context = Context::new();
        context
            .insert("content", content)
            .insert("STYLES_PATH", self.styles_path.as_str());
        self.layout.render(&context)
    }
}

/// One `<article>` summary per post, in the given order
pub fn post_list_html(posts: &[Post]) -> String {
    posts
        .iter()
        .map(|post| {
            format!(
                "\n    <article>\n      <h2><a href=\"{}\">{}</a></h2>\n      <time>{}</time>\n    </article>\n  ",
                post.url(),
                post.title_or_empty(),
                post.date_or_empty()
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use std::path::PathBuf;

    fn post(filename: &str, title: &str, date: &str, content: &str) -> Post {
        Post {
            title: Some(title.to_string()),
            date: Some(date.to_string()),
            parsed_date: None,
            filename: filename.to_string(),
            content: content.to_string(),
            source: PathBuf::from(format!("{}.md", filename)),
            extra: IndexMap::new(),
        }
    }

    fn renderer() -> TemplateRenderer {
        TemplateRenderer::from_templates(
            Template::new(
                LAYOUT_TEMPLATE,
                r#"<link href="{{STYLES_PATH}}"><main>{{content}}</main>"#,
            ),
            Template::new(POST_TEMPLATE, "<h1>{{title}}</h1><time>{{date}}</time>{{content}}"),
            Template::new(INDEX_TEMPLATE, "<section>{{posts}}</section>"),
            "/styles/main.css",
        )
    }

    #[test]
    fn test_replaces_known_placeholders() {
        let template = Template::new("t", "Hello {{name}}!");
        let mut context = Context::new();
        context.insert("name", "world");
        assert_eq!(template.render(&context), "Hello world!");
    }

    #[test]
    fn test_unknown_placeholders_survive() {
        let template = Template::new("t", "{{title}} by {{author}}");
        let mut context = Context::new();
        context.insert("title", "Post");
        assert_eq!(template.render(&context), "Post by {{author}}");
    }

    #[test]
    fn test_only_first_occurrence_replaced() {
        let template = Template::new("t", "{{title}} | {{title}}");
        let mut context = Context::new();
        context.insert("title", "A");
        assert_eq!(template.render(&context), "A | {{title}}");
    }

    #[test]
    fn test_unresolved_names_listed_once_in_order() {
        let mut context = Context::new();
        context.insert("title", "T");
        let names = unresolved("{{a}} {{title}} {{b}} {{a}} {{b}}", &context);
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let template = Template::new("t", "{{title}} {{date}}");
        let mut context = Context::new();
        context.insert("title", "about {{date}}").insert("date", "2024-01-01");
        assert_eq!(template.render(&context), "about {{date}} 2024-01-01");
    }

    #[test]
    fn test_dollar_signs_are_literal() {
        let template = Template::new("t", "<p>{{content}}</p>");
        let mut context = Context::new();
        context.insert("content", "costs $1 and $& more");
        assert_eq!(template.render(&context), "<p>costs $1 and $& more</p>");
    }

    #[test]
    fn test_spaced_tokens_are_not_placeholders() {
        let template = Template::new("t", "{{ title }}");
        let mut context = Context::new();
        context.insert("title", "X");
        assert_eq!(template.render(&context), "{{ title }}");
    }

    #[test]
    fn test_render_post_page() {
        let html = renderer().render_post(&post("hello", "Hello", "2024-01-01", "<h1>Hi</h1>\n"));
        assert_eq!(
            html,
            "<link href=\"/styles/main.css\"><main><h1>Hello</h1><time>2024-01-01</time><h1>Hi</h1>\n</main>"
        );
    }

    #[test]
    fn test_render_post_with_missing_title() {
        let mut p = post("x", "", "2024-01-01", "");
        p.title = None;
        let html = renderer().render_post(&p);
        assert!(html.contains("<h1></h1>"));
    }

    #[test]
    fn test_render_index_page() {
        let posts = vec![
            post("feb", "February", "2024-02-01", ""),
            post("jan", "January", "2024-01-01", ""),
        ];
        let html = renderer().render_index(&posts);
        assert!(html.starts_with("<link href=\"/styles/main.css\"><main><section>"));
        let feb = html.find(r#"<a href="/posts/feb.html">February</a>"#).unwrap();
        let jan = html.find(r#"<a href="/posts/jan.html">January</a>"#).unwrap();
        assert!(feb < jan);
        assert!(html.contains("<time>2024-02-01</time>"));
    }

    #[test]
    fn test_post_list_fragment_format() {
        let list = post_list_html(&[post("foo", "Foo", "2024-01-01", "")]);
        assert_eq!(
            list,
            "\n    <article>\n      <h2><a href=\"/posts/foo.html\">Foo</a></h2>\n      <time>2024-01-01</time>\n    </article>\n  "
        );
        assert_eq!(post_list_html(&[]), "");
    }

    #[test]
    fn test_load_missing_template_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = TemplateRenderer::load(dir.path(), "/styles/main.css")
            .err()
            .unwrap();
        assert!(matches!(err, BuildError::MissingTemplate { .. }));
    }
}
