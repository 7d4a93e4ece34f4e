mod link;

pub use link::validate_ad_links;
