use async_trait::async_trait;
use chrono::Utc;
use dashmap::{mapref::entry::Entry, DashMap};
use rand::{rng, seq::IteratorRandom};

use crate::errors::RepositoryError;
use crate::models::{Link, NewLink};

use super::LinkRepository;

type Result<T> = std::result::Result<T, RepositoryError>;

/// In-memory link store keyed by short id.
///
/// Enforces the same uniqueness rule as the `links` table and samples the way
/// `get_random_links` does, so it can stand in for Postgres in local runs and
/// tests. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryLinkRepository {
    links: DashMap<String, Link>,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored links
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.links.len()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn insert(&self, link: &NewLink) -> Result<String> {
        match self.links.entry(link.short_id.clone()) {
            Entry::Occupied(_) => Err(RepositoryError::Conflict(format!(
                "Short id '{}' already exists",
                link.short_id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(Link {
                    short_id: link.short_id.clone(),
                    destination_url: link.destination_url.clone(),
                    link_type: link.link_type.clone(),
                    created_at: Utc::now(),
                });
                Ok(link.short_id.clone())
            }
        }
    }

    async fn find_by_short_id(&self, short_id: &str) -> Result<Option<Link>> {
        Ok(self.links.get(short_id).map(|entry| entry.value().clone()))
    }

    async fn sample_short_ids(&self, link_type: &str, count: i64) -> Result<Vec<String>> {
        if count <= 0 {
            return Ok(Vec::new());
        }
        // The sampler preallocates `amount`, so never ask for more than exists
        let amount = usize::try_from(count)
            .unwrap_or(usize::MAX)
            .min(self.links.len());

        let ids = self
            .links
            .iter()
            .filter(|entry| entry.link_type == link_type)
            .map(|entry| entry.short_id.clone())
            .choose_multiple(&mut rng(), amount);

        Ok(ids)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn new_link(id: &str, url: &str, link_type: &str) -> NewLink {
        NewLink {
            short_id: id.to_string(),
            destination_url: url.to_string(),
            link_type: link_type.to_string(),
        }
    }

    #[tokio::test]
    async fn insert_and_find() {
        let repo = MemoryLinkRepository::new();

        let id = repo
            .insert(&new_link("abc123xyz", "https://example.com", "video"))
            .await
            .unwrap();
        assert_eq!(id, "abc123xyz");

        let link = repo.find_by_short_id("abc123xyz").await.unwrap().unwrap();
        assert_eq!(link.destination_url, "https://example.com");
        assert_eq!(link.link_type, "video");
    }

    #[tokio::test]
    async fn find_missing_returns_none() {
        let repo = MemoryLinkRepository::new();
        assert!(repo.find_by_short_id("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_short_id_conflicts() {
        let repo = MemoryLinkRepository::new();
        repo.insert(&new_link("abc123xyz", "https://one.example", "video"))
            .await
            .unwrap();

        let err = repo
            .insert(&new_link("abc123xyz", "https://two.example", "video"))
            .await
            .unwrap_err();
        assert!(err.is_conflict());

        // The first row is untouched
        let link = repo.find_by_short_id("abc123xyz").await.unwrap().unwrap();
        assert_eq!(link.destination_url, "https://one.example");
    }

    #[tokio::test]
    async fn sample_only_returns_requested_type() {
        let repo = MemoryLinkRepository::new();
        for i in 0..5 {
            repo.insert(&new_link(&format!("video{:04}", i), "https://v.example", "video"))
                .await
                .unwrap();
            repo.insert(&new_link(&format!("ad{:07}", i), "https://a.example", "adsterra"))
                .await
                .unwrap();
        }

        let ids = repo.sample_short_ids("video", 3).await.unwrap();
        assert_eq!(ids.len(), 3);
        assert!(ids.iter().all(|id| id.starts_with("video")));

        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), 3);
    }

    #[tokio::test]
    async fn sample_under_supply_returns_everything() {
        let repo = MemoryLinkRepository::new();
        repo.insert(&new_link("video0001", "https://v.example", "video"))
            .await
            .unwrap();

        let ids = repo.sample_short_ids("video", 10).await.unwrap();
        assert_eq!(ids, vec!["video0001".to_string()]);

        let ids = repo.sample_short_ids("video", i64::MAX).await.unwrap();
        assert_eq!(ids.len(), 1);
    }

    #[tokio::test]
    async fn sample_non_positive_count_is_empty() {
        let repo = MemoryLinkRepository::new();
        repo.insert(&new_link("video0001", "https://v.example", "video"))
            .await
            .unwrap();

        assert!(repo.sample_short_ids("video", 0).await.unwrap().is_empty());
        assert!(repo.sample_short_ids("video", -3).await.unwrap().is_empty());
    }
}
