//! Carebook Library
//!
//! Core library for the Carebook patient records client.

pub mod analytics;
pub mod api;
pub mod app;
pub mod controller;
pub mod forms;
pub mod repository;
pub mod session;
pub mod storage;
pub mod types;
pub mod ui;

#[cfg(test)]
pub(crate) mod testing;
