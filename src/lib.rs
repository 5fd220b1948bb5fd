//! A small CRUD service over users, customers and products.
//!
//! Layers, innermost first: [`db`] holds the entities, the data-source seam
//! and its two backends; [`usecase`] enforces existence and uniqueness;
//! [`api`] validates requests and maps outcomes onto HTTP; [`container`]
//! wires the graph together once at startup.

pub mod api;
pub mod container;
pub mod db;
pub mod usecase;
