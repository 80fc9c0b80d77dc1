use fmt::Display;
use std::fmt;
use std::fmt::Formatter;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug)]
pub struct Post {
    pub published: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub summary: String,
    pub author: String,
    pub aliases: Vec<String>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
}

// Field order here is the key order of the rendered front matter
#[derive(Serialize)]
struct FrontMatter<'a> {
    title: &'a str,
    categories: &'a [String],
    tags: &'a [String],
    aliases: &'a [String],
    author: &'a str,
    date: String,
    lastmod: String,
    slug: &'a str,
    summary: &'a str,
}

impl Display for Post {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "slug={}, date={}, title={}",
               self.slug,
               self.published,
               self.title,
        )
    }
}

/// Example of a rendered post
/// {"title":"Hello","categories":["General"],"tags":[],"aliases":[],"author":"","date":"2020-01-02T03:04:05+00:00","lastmod":"2020-01-02T03:04:05+00:00","slug":"hello","summary":""}
///
/// <p>First post.</p>
impl Post {
    pub fn front_matter(&self) -> Result<String> {
        let front_matter = FrontMatter {
            title: &self.title,
            categories: &self.categories,
            tags: &self.tags,
            aliases: &self.aliases,
            author: &self.author,
            date: self.published.to_rfc3339(),
            lastmod: self.modified.to_rfc3339(),
            slug: &self.slug,
            summary: &self.summary,
        };

        serde_json::to_string(&front_matter)
            .with_context(|| format!("Error rendering front matter of post {}", self.slug))
    }

    pub fn to_markdown(&self) -> Result<String> {
        Ok(format!("{}\n\n{}", self.front_matter()?, self.content))
    }
}
