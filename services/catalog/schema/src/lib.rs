//! sea-orm entities for the catalog database.

pub mod books;
pub mod users;
