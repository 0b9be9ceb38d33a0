//! Shared utility modules used across thaifreq components.

pub mod deadline;
