//! Route modules for the figures server

pub mod extract;
pub mod health;
pub mod visualize;
