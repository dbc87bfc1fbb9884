mod models;
mod vocab;

pub use models::*;
pub use vocab::{ChangeFrequency, Environment, RedirectStatus};
