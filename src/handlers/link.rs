use actix_web::{web, HttpResponse, Responder};
use log::info;

use crate::{
    models::{
        CreateRotatedLinksDto, LinkDetailsQuery, LinkDetailsResponseDto, RotatedLinksResponseDto,
        SaveLinkDto, SaveLinkResponseDto,
    },
    repositories::LinkRepository,
    services::{LinkService, LinkServiceTrait},
    types::Result,
};

pub type LinkServiceType = LinkService<dyn LinkRepository>;

/// `POST /api/save-link`
pub async fn save_link_handler(
    dto: web::Json<SaveLinkDto>,
    service: web::Data<LinkServiceType>,
) -> Result<impl Responder> {
    let id = service.save_link(dto.into_inner()).await?;
    info!("Created short link '{}'", id);
    Ok(HttpResponse::Ok().json(SaveLinkResponseDto { id }))
}

/// `GET /api/get-link-details?id=<shortId>`
pub async fn get_link_details_handler(
    query: web::Query<LinkDetailsQuery>,
    service: web::Data<LinkServiceType>,
) -> Result<impl Responder> {
    let details = service.get_link_details(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(LinkDetailsResponseDto::from(details)))
}

/// `POST /api/create-rotated-links`
pub async fn create_rotated_links_handler(
    dto: web::Json<CreateRotatedLinksDto>,
    service: web::Data<LinkServiceType>,
) -> Result<impl Responder> {
    let ids = service.create_rotated_links(dto.into_inner()).await?;
    info!("Generated rotation batch of {} ids", ids.len());
    Ok(HttpResponse::Ok().json(RotatedLinksResponseDto { ids }))
}
