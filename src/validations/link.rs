use validator::ValidationError;

/// Validates that every advertisement destination in a rotation request is
/// non-empty. Runs before any insert so a bad entry never leaves a partial batch.
pub fn validate_ad_links(links: &[String]) -> Result<(), ValidationError> {
    if let Some(index) = links.iter().position(|link| link.is_empty()) {
        let mut err = ValidationError::new("adsterra_link_empty");
        err.message = Some(format!("adsterraLinks[{}] must not be empty", index).into());
        return Err(err);
    }

    Ok(())
}
