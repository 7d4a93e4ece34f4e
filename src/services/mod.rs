mod link;

pub use link::{LinkService, LinkServiceTrait};
