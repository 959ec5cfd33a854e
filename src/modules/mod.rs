//! Modules layer - Infrastructure components for external integrations
//!
//! Contains clients and adapters for infrastructure concerns like storage.

pub mod storage;
