pub mod feedback;
pub mod job;
pub mod keyword;
pub mod setting;
pub mod snapshot;
pub mod viewed;
