pub mod matches;
pub mod user;
pub mod user_info;
