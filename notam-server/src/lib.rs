//! NOTAM lookup server.
//!
//! Answers: "what notices apply at the airport my flight departs from?"
//! A flight number is resolved to its route, the departure airport's
//! NOTAM page is fetched, and the notices are returned as published and
//! with their common abbreviations translated.

pub mod config;
pub mod domain;
pub mod flights;
pub mod notam;
pub mod pipeline;
pub mod web;
