//! Gradekeeper - school administration platform backend
//!
//! This library provides the server-side core for the Gradekeeper admin
//! dashboard. The heart of it is the system settings subsystem: a typed
//! key/value configuration store with idempotent default provisioning and
//! a partial-success bulk update contract.
//!
//! # Architecture
//! - `settings`: setting record store, type coercion, seed set, service
//! - `notify`: external email/SMS collaborator boundary
//! - `api`: HTTP services consumed by the React admin dashboard
//! - `config`: process bootstrap configuration
//! - `errors`: application error taxonomy

pub mod api;
pub mod config;
pub mod errors;
pub mod notify;
pub mod settings;
