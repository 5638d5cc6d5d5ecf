// User profile: full-document save with server-derived completion.

pub mod completion;
pub mod handlers;
pub mod storage;
