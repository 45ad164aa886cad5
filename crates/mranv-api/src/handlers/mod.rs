//! HTTP handlers

pub mod example;
pub mod health;
