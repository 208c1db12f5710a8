//! Domain building blocks for the cake store.
//!
//! Everything in this crate is pure: request transcoding and validation,
//! pagination arithmetic, the listing whitelist, the error taxonomy, and the
//! image upload capability trait. Persistence lives in `cakestore-db`, upload
//! backends in `cakestore-cloud`.

pub mod cake;
pub mod error;
pub mod listing;
pub mod pagination;
pub mod types;
pub mod upload;
