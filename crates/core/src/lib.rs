//! Core library for docfinder
//!
//! This crate implements the **Functional Core** of the docfinder application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`docfinder_core`** (this crate): Pure transformation functions with zero I/O
//! - **`docfinder`**: The HTTP fetch, the command line and the HTTP server (the
//!   Imperative Shell)
//!
//! Every function here is deterministic: the visible list is a pure function of
//! the fetched doctors and the filter state, and the filter state is a pure
//! projection of the query string.
//!
//! # Module Organization
//!
//! - [`doctor`]: Raw endpoint records, normalization and the specialty catalog
//! - [`filters`]: The filter state and the filter/sort engine
//! - [`query`]: Query string decoding, encoding and filter transitions
//! - [`suggest`]: Autocomplete suggestions and specialty lookup
//! - [`view`]: What the rendering layer receives (loading, error, results)
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use docfinder_core::filters::FilterState;
//! use docfinder_core::query::{apply_update, FilterUpdate, QueryParams};
//! use docfinder_core::view::Directory;
//!
//! let directory = Directory::new(doctors);
//!
//! let params = QueryParams::parse("?specialty=ENT&sort=fees");
//! let params = apply_update(&params, &FilterUpdate::Mode("video".to_string()));
//!
//! let view = directory.view(&FilterState::from_params(&params));
//! assert_eq!(view.query, "specialty=ENT&sort=fees&mode=video");
//! ```

pub mod doctor;
pub mod filters;
pub mod query;
pub mod suggest;
pub mod view;
