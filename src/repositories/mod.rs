mod link;
mod memory;

#[cfg(test)]
pub use link::MockLinkRepository;
pub use link::{LinkRepository, PgLinkRepository};
pub use memory::MemoryLinkRepository;
