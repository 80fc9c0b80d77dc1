use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::post::Post;

/// Writes posts in the directory layout static site generators consume:
/// `<target>/content/posts/<slug>/index.md`
pub struct SiteWriter {
    posts_dir: PathBuf,
    index_file_name: String,
}

impl SiteWriter {
    pub fn new(base_path: &Path, index_base_name: &str) -> SiteWriter {
        SiteWriter {
            posts_dir: base_path.join("content").join("posts"),
            index_file_name: format!("{}.md", index_base_name),
        }
    }

    /// Creates the post directory, named after the slug, and writes the
    /// rendered markdown inside it. An existing file at that path is
    /// overwritten. Two posts sharing a slug end up in the same file, last
    /// one wins.
    pub fn add_post(&self, post: &Post) -> Result<PathBuf> {
        let post_dir = self.posts_dir.join(&post.slug);
        fs::create_dir_all(&post_dir)
            .with_context(|| format!("Error creating {}", post_dir.display()))?;

        let index_path = post_dir.join(&self.index_file_name);
        fs::write(&index_path, post.to_markdown()?)
            .with_context(|| format!("Error writing {}", index_path.display()))?;

        Ok(index_path)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crate::text_utils::parse_gmt_date_time;

    use super::*;

    fn sample_post(content: &str) -> Post {
        Post {
            published: parse_gmt_date_time("2020-01-02T03:04:05").unwrap(),
            modified: parse_gmt_date_time("2020-01-02T03:04:05").unwrap(),
            title: "Hello World".to_string(),
            slug: "hello-world".to_string(),
            content: content.to_string(),
            summary: "".to_string(),
            author: "".to_string(),
            aliases: vec![],
            categories: vec!["General".to_string()],
            tags: vec![],
        }
    }

    #[test]
    fn test_add_post() {
        let target = tempfile::tempdir().unwrap();
        let site = SiteWriter::new(target.path(), "index");

        let written = site.add_post(&sample_post("First post.\n")).unwrap();
        assert_eq!(
            written,
            target.path().join("content/posts/hello-world/index.md")
        );

        let body = fs::read_to_string(&written).unwrap();
        let (header, content) = body.split_once("\n\n").unwrap();
        assert!(header.contains(r#""slug":"hello-world""#));
        assert!(header.contains(r#""categories":["General"]"#));
        assert_eq!(content, "First post.\n");
    }

    #[test]
    fn test_add_post_overwrites() {
        let target = tempfile::tempdir().unwrap();
        let site = SiteWriter::new(target.path(), "index");

        let first = site.add_post(&sample_post("Old content.\n")).unwrap();
        let second = site.add_post(&sample_post("New content.\n")).unwrap();
        assert_eq!(first, second);

        let body = fs::read_to_string(&second).unwrap();
        assert!(body.ends_with("New content.\n"));
        assert!(!body.contains("Old content."));
    }

    #[test]
    fn test_index_base_name() {
        let target = tempfile::tempdir().unwrap();
        let site = SiteWriter::new(target.path(), "post");

        let written = site.add_post(&sample_post("Body.\n")).unwrap();
        assert_eq!(
            written,
            target.path().join("content/posts/hello-world/post.md")
        );
    }
}
