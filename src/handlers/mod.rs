mod link;

pub use link::{
    create_rotated_links_handler, get_link_details_handler, save_link_handler, LinkServiceType,
};
