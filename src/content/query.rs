//! Queries over a locale's post collection.
//!
//! Every function expects the collection the loader returns: published
//! posts sorted newest first.

use std::collections::{BTreeSet, HashMap};

use super::PostMeta;

/// First post with the given slug
pub fn find_by_slug<'a>(posts: &'a [PostMeta], slug: &str) -> Option<&'a PostMeta> {
    posts.iter().find(|p| p.slug == slug)
}

/// Newer and older neighbours of a post
#[derive(Debug, Clone, Copy, Default)]
pub struct Neighbors<'a> {
    pub newer: Option<&'a PostMeta>,
    pub older: Option<&'a PostMeta>,
}

/// Posts directly before (newer) and after (older) `slug`
pub fn neighbors<'a>(posts: &'a [PostMeta], slug: &str) -> Neighbors<'a> {
    let Some(idx) = posts.iter().position(|p| p.slug == slug) else {
        return Neighbors::default();
    };

    Neighbors {
        newer: idx.checked_sub(1).map(|i| &posts[i]),
        older: posts.get(idx + 1),
    }
}

/// Other posts sharing tags with `post`, most shared tags first, then newest
pub fn related<'a>(posts: &'a [PostMeta], post: &PostMeta, limit: usize) -> Vec<&'a PostMeta> {
    let mut scored: Vec<(usize, &PostMeta)> = posts
        .iter()
        .filter(|p| p.slug != post.slug)
        .map(|p| {
            let overlap = p.tags.iter().filter(|t| post.tags.contains(t)).count();
            (overlap, p)
        })
        .filter(|(overlap, _)| *overlap > 0)
        .collect();

    scored.sort_by(|(oa, a), (ob, b)| ob.cmp(oa).then_with(|| b.date.cmp(&a.date)));
    scored.into_iter().take(limit).map(|(_, p)| p).collect()
}

/// Every tag in use, sorted and de-duplicated
pub fn all_tags(posts: &[PostMeta]) -> Vec<String> {
    posts
        .iter()
        .flat_map(|p| p.tags.iter())
        .filter(|t| !t.trim().is_empty())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Tag usage counts, most used first, ties by name
pub fn tag_counts(posts: &[PostMeta]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for tag in posts.iter().flat_map(|p| p.tags.iter()) {
        if !tag.trim().is_empty() {
            *counts.entry(tag.as_str()).or_insert(0) += 1;
        }
    }

    let mut counts: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(t, c)| (t.to_string(), c))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

/// Posts carrying `tag`, in collection order
pub fn posts_with_tag<'a>(posts: &'a [PostMeta], tag: &str) -> Vec<&'a PostMeta> {
    posts.iter().filter(|p| p.has_tag(tag)).collect()
}

/// Search by free text and optional tag.
///
/// Every whitespace-separated term must appear (case-insensitively) in the
/// title, summary or a tag. Posts with more terms in the title rank first;
/// ties keep collection order.
pub fn search<'a>(posts: &'a [PostMeta], query: &str, tag: Option<&str>) -> Vec<&'a PostMeta> {
    let terms: Vec<String> = query.split_whitespace().map(|t| t.to_lowercase()).collect();

    let mut hits: Vec<(usize, &PostMeta)> = posts
        .iter()
        .filter_map(|p| {
            if terms.is_empty() {
                return Some((0, p));
            }

            let title = p.title.to_lowercase();
            let summary = p.summary.as_deref().unwrap_or_default().to_lowercase();
            let tags: Vec<String> = p.tags.iter().map(|t| t.to_lowercase()).collect();

            let mut title_hits = 0;
            for term in &terms {
                let in_title = title.contains(term.as_str());
                let matched = in_title
                    || summary.contains(term.as_str())
                    || tags.iter().any(|t| t.contains(term.as_str()));
                if !matched {
                    return None;
                }
                if in_title {
                    title_hits += 1;
                }
            }
            Some((title_hits, p))
        })
        .collect();

    hits.sort_by(|a, b| b.0.cmp(&a.0));

    hits.into_iter()
        .map(|(_, p)| p)
        .filter(|p| match tag {
            Some(tag) if !tag.is_empty() => p.has_tag(tag),
            _ => true,
        })
        .collect()
}
