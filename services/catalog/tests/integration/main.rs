mod auth_test;
mod helpers;
mod user_test;
