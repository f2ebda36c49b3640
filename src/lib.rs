//! Travel Back-Office
//!
//! Admin client for the travel booking REST API: list screens with paging,
//! debounced search and confirmed deletes, create/edit forms that submit
//! multipart payloads, a permission gate and a client-side dashboard.

pub mod api;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod errors;
pub mod forms;
pub mod models;
pub mod notify;
pub mod permissions;
pub mod screens;
pub mod search;

#[cfg(test)]
mod tests;
