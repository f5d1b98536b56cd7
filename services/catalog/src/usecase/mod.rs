pub mod book;
pub mod google;
pub mod login;
pub mod session;
pub mod signup;
pub mod user;
