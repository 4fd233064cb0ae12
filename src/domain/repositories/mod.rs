// Interfaces implemented by the infrastructure layer
pub mod major_directory_repository;
pub mod object_storage_repository;
pub mod people_repository;
