pub mod blog;
pub mod certificate;
pub mod logo;
pub mod media;
pub mod response;
pub mod users;
