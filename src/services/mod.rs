pub mod analytics;
pub mod insights;
pub mod scheduling;
pub mod slug;
pub mod storage;
pub mod weather;
