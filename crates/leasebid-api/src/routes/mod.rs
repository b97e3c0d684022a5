//! Route modules.

pub mod demo_data;
pub mod health;
pub mod walkthrough;
