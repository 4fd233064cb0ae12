// Domain layer - models, repository interfaces, and pure helpers
pub mod errors;
pub mod models;
pub mod repositories;
pub mod validation;
