//! Email sentiment triage. Classifies outreach replies as interested,
//! neutral or not interested.

pub mod config;
pub mod error;
pub mod inbox;
pub mod pipeline;
pub mod scorer;
