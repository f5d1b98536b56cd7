//! Domain types shared across the Bookshelf workspace.
//!
//! This crate contains only pure types and pure functions with no framework
//! dependencies. Import in `usecase/` and `domain/` layers; never in `infra/`
//! or `handlers/`.

pub mod genre;
pub mod search;
pub mod user;
