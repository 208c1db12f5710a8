//! Business logic sitting between the HTTP handlers and the repositories.

pub mod cake_service;

pub use cake_service::CakeService;
