//! # Media lookups and permalink resolution
//!
//! A permalink identifies one media post durably. Replies carry a
//! `parent_id`; resolving a reply's permalink lands the browser on the root
//! post's city page with the root id as the scroll target.

use domains::error::{AppError, Result};
use domains::models::Media;
use domains::ports::MediaRepo;
use std::sync::Arc;

/// Where a resolved permalink sends the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityRedirect {
    pub city_slug: String,
    pub media_id: i32,
}

impl CityRedirect {
    /// The relative URL the redirect response points at.
    pub fn path(&self) -> String {
        format!("/city/{}?media={}", self.city_slug, self.media_id)
    }
}

#[derive(Clone)]
pub struct MediaService {
    repo: Arc<dyn MediaRepo>,
}

impl MediaService {
    pub fn new(repo: Arc<dyn MediaRepo>) -> Self {
        Self { repo }
    }

    /// Resolves a permalink to its city redirect. Replies resolve to their
    /// parent post's id; the unknown-permalink case is a `NotFound` that the
    /// web layer turns into a soft redirect to the site root.
    pub async fn resolve_permalink(&self, permalink: &str) -> Result<CityRedirect> {
        let target = self
            .repo
            .find_by_permalink(permalink)
            .await?
            .ok_or_else(|| AppError::not_found("media", permalink))?;

        Ok(CityRedirect {
            city_slug: target.city_slug.clone(),
            media_id: target.display_id(),
        })
    }

    /// Media belonging to one pessoa, newest first.
    pub async fn list_for_pessoa(&self, pessoa_id: i32) -> Result<Vec<Media>> {
        self.repo.list_by_pessoa(pessoa_id).await
    }
}
