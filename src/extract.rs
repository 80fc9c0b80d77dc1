use std::collections::HashMap;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use serde_json::Value;
use spdlog::{debug, info};

use crate::client::Client;
use crate::pager::PagedList;
use crate::post::Post;
use crate::text_utils::{parse_gmt_date_time, unescape_entities};

/// A category or tag record, as served by /wp-json/wp/v2/{categories,tags}
#[derive(Deserialize)]
pub struct Term {
    pub id: i64,
    pub name: String,
}

#[derive(Deserialize)]
pub struct Rendered {
    pub rendered: String,
}

/// The subset of a /wp-json/wp/v2/posts record the migration consumes
#[derive(Deserialize)]
pub struct RawPost {
    pub date_gmt: String,
    pub modified_gmt: String,
    pub title: Rendered,
    pub slug: String,
    pub categories: Vec<i64>,
    pub tags: Vec<i64>,
    pub content: Rendered,
    pub excerpt: Rendered,
}

/// ID -> name lookup for one taxonomy, filled once per run and read-only
/// afterwards. Posts referencing an ID that is not here fail the run.
pub struct TermCache {
    taxonomy: &'static str,
    names: HashMap<i64, String>,
    populated: bool,
}

impl TermCache {
    pub fn new(taxonomy: &'static str) -> TermCache {
        TermCache {
            taxonomy,
            names: HashMap::new(),
            populated: false,
        }
    }

    pub fn is_populated(&self) -> bool {
        self.populated
    }

    /// First call wins. Later calls are ignored, so resolution results stay
    /// stable for the lifetime of the extractor.
    pub fn populate(&mut self, terms: Vec<Term>) {
        if self.populated {
            return;
        }

        self.names = terms.into_iter().map(|term| (term.id, term.name)).collect();
        self.populated = true;
    }

    pub fn resolve(&self, id: i64) -> Result<&str> {
        self.names
            .get(&id)
            .map(String::as_str)
            .ok_or_else(|| anyhow!("{} {} not found in the fetched vocabulary", self.taxonomy, id))
    }

    pub fn resolve_all(&self, ids: &[i64]) -> Result<Vec<String>> {
        ids.iter()
            .map(|id| self.resolve(*id).map(str::to_string))
            .collect()
    }
}

pub struct Extractor {
    base_url: String,
    client: Client,
    per_page: u32,
    categories: TermCache,
    tags: TermCache,
}

impl Extractor {
    pub fn new(base_url: &str, per_page: u32, user_agent: Option<&str>) -> Result<Extractor> {
        Ok(Extractor {
            base_url: base_url.to_string(),
            client: Client::new(user_agent)?,
            per_page,
            categories: TermCache::new("category"),
            tags: TermCache::new("tag"),
        })
    }

    fn endpoint(&self, resource: &str) -> String {
        format!("{}/wp-json/wp/v2/{}", self.base_url, resource)
    }

    fn fetch_page(&self, url: &str, page: u32) -> Result<String> {
        debug!("Fetching {} page {}", url, page);

        let params = [
            ("page", page.to_string()),
            ("per_page", self.per_page.to_string()),
            ("order", "asc".to_string()),
            ("orderby", "id".to_string()),
        ];
        let response = self.client.get(url, &params, &[])?;
        response
            .text()
            .with_context(|| format!("Error reading response from {}", url))
    }

    fn fetch_terms_of(&self, resource: &str) -> Result<Vec<Term>> {
        let url = self.endpoint(resource);
        PagedList::new(|page| self.fetch_page(&url, page))
            .map(|item| {
                serde_json::from_value(item?)
                    .with_context(|| format!("Unexpected record in {}", resource))
            })
            .collect()
    }

    /// One-time fetch of the full category and tag vocabularies. Calling it
    /// again does not hit the API a second time.
    pub fn fetch_terms(&mut self) -> Result<()> {
        if self.categories.is_populated() && self.tags.is_populated() {
            return Ok(());
        }

        let categories = self.fetch_terms_of("categories")?;
        info!("Fetched {} categories", categories.len());
        self.categories.populate(categories);

        let tags = self.fetch_terms_of("tags")?;
        info!("Fetched {} tags", tags.len());
        self.tags.populate(tags);

        Ok(())
    }

    fn normalize_post(&self, value: Value) -> Result<Post> {
        let raw: RawPost = serde_json::from_value(value).context("Unexpected post record")?;

        let published = parse_gmt_date_time(&raw.date_gmt).map_err(|e| anyhow!(e))?;
        let modified = parse_gmt_date_time(&raw.modified_gmt).map_err(|e| anyhow!(e))?;

        Ok(Post {
            published,
            modified,
            title: unescape_entities(&raw.title.rendered),
            slug: raw.slug,
            content: unescape_entities(&raw.content.rendered),
            summary: unescape_entities(&raw.excerpt.rendered),
            author: String::new(),
            aliases: vec![],
            categories: self.categories.resolve_all(&raw.categories)?,
            tags: self.tags.resolve_all(&raw.tags)?,
        })
    }

    /// All posts of the site, normalized, in ascending ID order. Posts are
    /// pulled page by page as the iterator advances.
    pub fn posts(&mut self) -> Result<impl Iterator<Item = Result<Post>> + '_> {
        self.fetch_terms()?;

        let this = &*self;
        let url = this.endpoint("posts");
        let pages = PagedList::new(move |page| this.fetch_page(&url, page));
        Ok(pages.map(move |item| item.and_then(|value| this.normalize_post(value))))
    }
}

#[cfg(test)]
mod tests {
    use crate::test_data::RAW_POST;

    use super::*;

    fn term(id: i64, name: &str) -> Term {
        Term {
            id,
            name: name.to_string(),
        }
    }

    fn populated_extractor() -> Extractor {
        let mut extractor = Extractor::new("https://blog.example.org", 100, None).unwrap();
        extractor.categories.populate(vec![term(1, "General"), term(3, "News"), term(7, "Events")]);
        extractor.tags.populate(vec![term(2, "rust")]);
        extractor
    }

    #[test]
    fn test_resolve_preserves_order() {
        let mut cache = TermCache::new("category");
        cache.populate(vec![term(3, "News"), term(7, "Events")]);

        assert_eq!(cache.resolve_all(&[3, 7]).unwrap(), ["News", "Events"]);
        assert_eq!(cache.resolve_all(&[7, 3]).unwrap(), ["Events", "News"]);
        assert_eq!(cache.resolve_all(&[]).unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_resolve_missing_id() {
        let mut cache = TermCache::new("category");
        cache.populate(vec![term(3, "News")]);

        let err = cache.resolve(99).unwrap_err();
        assert!(err.to_string().contains("category 99"));
    }

    #[test]
    fn test_populate_only_once() {
        let mut cache = TermCache::new("tag");
        assert!(!cache.is_populated());

        cache.populate(vec![term(1, "first")]);
        cache.populate(vec![term(1, "second"), term(2, "ignored")]);

        assert!(cache.is_populated());
        assert_eq!(cache.resolve(1).unwrap(), "first");
        assert!(cache.resolve(2).is_err());
    }

    #[test]
    fn test_normalize_post() {
        let extractor = populated_extractor();
        let value: Value = serde_json::from_str(RAW_POST).unwrap();
        let post = extractor.normalize_post(value).unwrap();

        assert_eq!(post.slug, "hello-world");
        assert_eq!(post.title, "A & B");
        assert_eq!(post.published.to_rfc3339(), "2020-01-02T03:04:05+00:00");
        assert_eq!(post.modified.to_rfc3339(), "2020-01-05T10:11:12+00:00");
        assert_eq!(post.categories, ["General"]);
        assert_eq!(post.tags, ["rust"]);
        assert_eq!(post.content, "<p>It\u{2019}s alive</p>\n");
        assert_eq!(post.summary, "<p>Summary\u{2026}</p>\n");
        assert_eq!(post.author, "");
        assert!(post.aliases.is_empty());
    }

    #[test]
    fn test_normalize_post_with_unknown_category() {
        let extractor = populated_extractor();
        let mut value: Value = serde_json::from_str(RAW_POST).unwrap();
        value["categories"] = serde_json::json!([1, 99]);

        let err = extractor.normalize_post(value).unwrap_err();
        assert!(err.to_string().contains("category 99"));
    }
}
