// Dashboard: per-user summary counts, upcoming deadlines, and recommended
// opportunities.

pub mod handlers;
pub mod storage;
