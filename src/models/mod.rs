pub mod config;
pub mod objects;
pub mod status;
pub mod tree;
