// Application tracking: CRUD over a user's saved applications plus the
// status lifecycle rules.

pub mod handlers;
pub mod storage;
pub mod transitions;
