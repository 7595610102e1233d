pub mod config;
pub mod factory;
pub mod http;
pub mod serialization;
