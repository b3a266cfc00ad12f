//! HTTP Route Handlers

pub mod health;
pub mod model;
pub mod predictions;
