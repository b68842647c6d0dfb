//! HTTP gateway for the two-jug measuring riddle.
//!
//! Decodes `GET /api/v1/riddle` queries, hands them to a [`service::RiddleService`]
//! and renders the resulting trace or error as JSON. Also serves the bundled
//! web client.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod error;
pub mod routes;
pub mod service;
