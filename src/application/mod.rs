// Application layer - orchestrates domain logic behind the repository seams
pub mod dto;
pub mod errors;
pub mod services;
