// Data Transfer Objects
pub mod profile_dto;
