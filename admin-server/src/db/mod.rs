//! Storage Module
//!
//! Records live in process memory behind repository types; handlers and
//! services only talk to the repositories.

pub mod models;
pub mod repository;
