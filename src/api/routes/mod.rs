//! API Routes
//!
//! Route handlers organized by functionality.

pub mod dashboard;
pub mod dataset;
pub mod health;
pub mod render;
