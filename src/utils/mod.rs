pub mod base36;
pub mod id_generator;
