pub mod auth;
pub mod blog;
pub mod certificates;
pub mod form;
pub mod logo;
pub mod user;
