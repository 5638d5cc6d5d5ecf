// Opportunity catalog: public browse/search endpoints and the insert path
// used by the seed binary.

pub mod filters;
pub mod handlers;
pub mod storage;
