//! Storage models

pub mod employee;

pub use employee::{Employee, NewEmployee};
