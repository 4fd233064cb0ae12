pub mod avatar_pipeline_service;
pub mod avatar_session;
pub mod major_directory_service;
pub mod profile_service;
pub mod profile_view_builder;
