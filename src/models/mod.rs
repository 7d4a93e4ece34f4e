mod link;

pub use link::{
    CreateRotatedLinksDto, Link, LinkDetails, LinkDetailsQuery, LinkDetailsResponseDto, NewLink,
    RotatedLinksResponseDto, SaveLinkDto, SaveLinkResponseDto, LINK_TYPE_ADSTERRA,
    LINK_TYPE_VIDEO,
};
