//! HTTP route handlers

pub mod face;
pub mod screen;
