//! Initialize a new site

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::SiteConfig;
use crate::templates::{INDEX_TEMPLATE, LAYOUT_TEMPLATE, POST_TEMPLATE};
use crate::CONFIG_FILE;

const LAYOUT_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <link rel="stylesheet" href="{{STYLES_PATH}}">
</head>
<body>
  <header><a href="/">Home</a></header>
  <main>
    {{content}}
  </main>
</body>
</html>
"#;

const POST_HTML: &str = r#"<article class="post">
  <h1>{{title}}</h1>
  <time>{{date}}</time>
  <div class="post-content">
    {{content}}
  </div>
</article>
"#;

const INDEX_HTML: &str = r#"<section class="posts">
  {{posts}}
</section>
"#;

const MAIN_CSS: &str = r#"body {
  max-width: 42rem;
  margin: 0 auto;
  padding: 1rem;
  font-family: system-ui, sans-serif;
  line-height: 1.6;
}

time {
  color: #666;
}
"#;

/// Initialize a new site in the given directory.
///
/// Fails without writing anything if any of the files already exist.
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config = SiteConfig::default();
    let templates_dir = target_dir.join(&config.templates_dir);
    let posts_dir = target_dir.join(&config.posts_dir);
    let styles_dir = target_dir.join(&config.styles_dir);

    let files: Vec<(PathBuf, String)> = vec![
        (target_dir.join(CONFIG_FILE), config_yaml(&config)),
        (templates_dir.join(LAYOUT_TEMPLATE), LAYOUT_HTML.to_string()),
        (templates_dir.join(POST_TEMPLATE), POST_HTML.to_string()),
        (templates_dir.join(INDEX_TEMPLATE), INDEX_HTML.to_string()),
        (styles_dir.join(&config.stylesheet), MAIN_CSS.to_string()),
        (posts_dir.join("hello-world.md"), sample_post()),
    ];

    if let Some((existing, _)) = files.iter().find(|(path, _)| path.exists()) {
        bail!("File already exists: {:?}", existing);
    }

    for (path, content) in &files {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {:?}", parent))?;
        }
        fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))?;
        tracing::debug!("Created: {:?}", path);
    }

    Ok(())
}

fn config_yaml(config: &SiteConfig) -> String {
    format!(
        r#"# mdpress configuration

# Site
title: {title}

# Directory
posts_dir: {posts}
templates_dir: {templates}
output_dir: {output}
styles_dir: {styles}

# Stylesheet
stylesheet: {stylesheet}
styles_path: {styles_path}

# Writing
strict_front_matter: false
highlight:
  enable: false
  theme: base16-ocean.dark
  line_number: false
"#,
        title = config.title,
        posts = config.posts_dir,
        templates = config.templates_dir,
        output = config.output_dir,
        styles = config.styles_dir,
        stylesheet = config.stylesheet,
        styles_path = config.styles_path,
    )
}

fn sample_post() -> String {
    let today = chrono::Local::now().format("%Y-%m-%d");
    format!(
        r#"---
title: Hello World
date: {}
---

# Hello World

This is your first post. Edit or delete it, then run `mdpress build`.
"#,
        today
    )
}
