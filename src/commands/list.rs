//! List posts

use anyhow::Result;

use crate::content::loader::ContentLoader;
use crate::content::Post;
use crate::Site;

/// Print every post, newest first
pub fn run(site: &Site) -> Result<()> {
    let posts = ContentLoader::new(site).load_posts()?;
    println!("Posts ({}):", posts.len());
    for post in &posts {
        println!("  {}", summary_line(post));
    }
    Ok(())
}

fn summary_line(post: &Post) -> String {
    format!(
        "{} - {} [{}]",
        post.date.as_deref().unwrap_or("(no date)"),
        post.title.as_deref().unwrap_or("(no title)"),
        post.output_path().display()
    )
}
