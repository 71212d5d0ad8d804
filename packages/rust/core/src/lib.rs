//! Core pipelines for startable.
//!
//! This crate ties together storage, the GitHub client, and Markdown
//! rendering into the end-to-end workflows: star enrichment of the catalog
//! CSV, regeneration of the README table, and the orchestrator running both.

pub mod enrichment;
pub mod pipeline;
pub mod update;
