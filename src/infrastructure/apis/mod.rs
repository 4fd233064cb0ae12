// HTTP implementations of the domain repositories
pub mod http_major_directory_repository;
pub mod http_object_storage_repository;
pub mod http_people_repository;
