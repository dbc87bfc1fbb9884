mod auth;
pub mod dto;
pub mod extract;
mod portfolio;
pub mod response;
mod router;
mod seo;
mod traffic;
pub mod validation;

pub use router::{AppState, create_router};
