//! Client for The Movie Database's upcoming-movies list.
//!
//! Requests are described as [`api::Resource`]s and run by an
//! [`api::Webservice`]; completions are delivered on the [`api::MainQueue`].
//! Poster URLs are built from an image configuration that
//! [`config::ConfigService`] keeps fresh and persisted.

pub mod api;
pub mod config;
pub mod error;
pub mod list_model;
pub mod models;
pub mod service;

pub use service::Tmdb;
