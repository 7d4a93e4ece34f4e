// src/services/link.rs - Business logic
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, error, warn};
use rand::{rng, seq::SliceRandom};
use validator::Validate;

use crate::errors::{AppError, RepositoryError, LINK_NOT_FOUND, SAVE_FAILED};
use crate::models::{
    CreateRotatedLinksDto, LinkDetails, LinkDetailsQuery, NewLink, SaveLinkDto,
    LINK_TYPE_ADSTERRA, LINK_TYPE_VIDEO,
};
use crate::repositories::LinkRepository;
use crate::utils::id_generator;

type Result<T> = std::result::Result<T, AppError>;

#[async_trait]
pub trait LinkServiceTrait {
    /// Mints a short id for `destinationUrl` and stores it
    async fn save_link(&self, dto: SaveLinkDto) -> Result<String>;

    /// Resolves a short id to its destination and type
    async fn get_link_details(&self, query: LinkDetailsQuery) -> Result<LinkDetails>;

    /// Stores each ad link, samples video links, and returns all ids shuffled
    async fn create_rotated_links(&self, dto: CreateRotatedLinksDto) -> Result<Vec<String>>;

    /// Checks that the backing store answers
    async fn ping_store(&self) -> Result<()>;
}

pub struct LinkService<T: LinkRepository + ?Sized> {
    repository: Arc<T>,
    max_insert_attempts: u32,
}

impl<T: LinkRepository + ?Sized> LinkService<T> {
    pub fn new(repository: Arc<T>) -> Self {
        Self {
            repository,
            max_insert_attempts: 1,
        }
    }

    /// Re-mint and retry an insert up to `attempts` times in total when the
    /// store reports a short id conflict
    pub fn with_max_insert_attempts(mut self, attempts: u32) -> Self {
        self.max_insert_attempts = attempts.max(1);
        self
    }

    async fn insert_with_fresh_id(
        &self,
        destination_url: &str,
        link_type: &str,
    ) -> std::result::Result<String, RepositoryError> {
        let mut attempt = 1;
        loop {
            let link = NewLink {
                short_id: id_generator::generate_link_id(),
                destination_url: destination_url.to_string(),
                link_type: link_type.to_string(),
            };

            match self.repository.insert(&link).await {
                Err(e) if e.is_conflict() && attempt < self.max_insert_attempts => {
                    warn!(
                        "Short id '{}' already taken (attempt {}/{}), minting another",
                        link.short_id, attempt, self.max_insert_attempts
                    );
                    attempt += 1;
                }
                result => return result,
            }
        }
    }
}

#[async_trait]
impl<T: LinkRepository + ?Sized> LinkServiceTrait for LinkService<T> {
    async fn save_link(&self, dto: SaveLinkDto) -> Result<String> {
        dto.validate()?;

        let link_type = dto.link_type_or_default();
        let Some(destination_url) = dto.destination_url else {
            return Err(AppError::Validation("destinationUrl required".to_string()));
        };

        let short_id = self
            .insert_with_fresh_id(&destination_url, &link_type)
            .await
            .map_err(|e| {
                error!("Save link error: {}", e);
                AppError::Persistence(SAVE_FAILED.to_string())
            })?;

        debug!("Saved '{}' link {} -> {}", link_type, short_id, destination_url);
        Ok(short_id)
    }

    async fn get_link_details(&self, query: LinkDetailsQuery) -> Result<LinkDetails> {
        query.validate()?;

        let Some(short_id) = query.id else {
            return Err(AppError::Validation("ID required".to_string()));
        };

        // Store failures and misses are indistinguishable to callers
        match self.repository.find_by_short_id(&short_id).await {
            Ok(Some(link)) => Ok(LinkDetails::from(link)),
            Ok(None) => {
                error!("Get link details error: no link with id '{}'", short_id);
                Err(AppError::NotFound(LINK_NOT_FOUND.to_string()))
            }
            Err(e) => {
                error!("Get link details error for '{}': {}", short_id, e);
                Err(AppError::NotFound(LINK_NOT_FOUND.to_string()))
            }
        }
    }

    async fn create_rotated_links(&self, dto: CreateRotatedLinksDto) -> Result<Vec<String>> {
        dto.validate()?;

        let mut ids = Vec::with_capacity(dto.adsterra_links.len());

        // Sequential on purpose: the first failure stops the batch and rows
        // written before it are kept.
        for ad_link in &dto.adsterra_links {
            let id = self
                .insert_with_fresh_id(ad_link, LINK_TYPE_ADSTERRA)
                .await
                .map_err(|e| {
                    error!(
                        "Create rotated links error after {} ad link(s) saved: {}",
                        ids.len(),
                        e
                    );
                    AppError::Operation(e.to_string())
                })?;
            ids.push(id);
        }

        if dto.video_count > 0 {
            let videos = self
                .repository
                .sample_short_ids(LINK_TYPE_VIDEO, dto.video_count)
                .await
                .map_err(|e| {
                    error!(
                        "Create rotated links error while sampling videos ({} ad link(s) kept): {}",
                        ids.len(),
                        e
                    );
                    AppError::Operation(e.to_string())
                })?;
            ids.extend(videos);
        }

        ids.shuffle(&mut rng());

        debug!(
            "Rotated batch of {} ids ({} ads)",
            ids.len(),
            dto.adsterra_links.len()
        );
        Ok(ids)
    }

    async fn ping_store(&self) -> Result<()> {
        self.repository
            .ping()
            .await
            .map_err(|e| AppError::Operation(e.to_string()))
    }
}
