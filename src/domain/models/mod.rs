pub mod avatar;
pub mod major;
pub mod team;
pub mod user;
