pub mod blob;
pub mod manager;
