pub mod article;
pub mod auth;
pub mod auth_callback;
pub mod category;
pub mod home;
pub mod not_found;
pub mod profile;
pub mod search;
