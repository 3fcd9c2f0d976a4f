// src/infrastructure/mod.rs
pub mod config;
pub mod file_store;
pub mod http_remote;

pub use config::Config;
pub use file_store::FileNoteStore;
pub use http_remote::HttpNoteRemote;
