//! HTTP routing and handlers

pub mod handlers;
