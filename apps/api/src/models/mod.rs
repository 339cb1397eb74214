pub mod candidate;
pub mod event;
pub mod job;
