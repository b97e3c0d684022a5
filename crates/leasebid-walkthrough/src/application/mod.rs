//! Application services that wire sequencers to the progress store.

pub mod query_handlers;
pub mod store;
pub mod walkthrough;
