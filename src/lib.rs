//! Translation pipeline with a session cache, in-flight deduplication and
//! a paced single-lane request queue, fronted by a fail-open façade.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod presentation;
pub mod state;
