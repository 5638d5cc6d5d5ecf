// Database row models shared across the API surface.

pub mod application;
pub mod opportunity;
pub mod profile;
pub mod user;
