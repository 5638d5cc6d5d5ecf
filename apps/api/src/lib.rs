//! CareerSync API — discovery and application tracking for jobs,
//! scholarships, internships, and grants.
//!
//! The binaries (`careersync-api`, `seed`) are thin wrappers over these
//! modules so the router, storage, and domain logic stay testable.

pub mod applications;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod errors;
pub mod extractors;
pub mod identity;
pub mod models;
pub mod opportunities;
pub mod profile;
pub mod routes;
pub mod state;
