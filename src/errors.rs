//! Error Types
//!
//! This module defines the error types used throughout the pipeline.
//!
//! # Overview
//!
//! [`PipelineError`] covers the failures this crate surfaces to the host:
//! - Lighting shader lookup failures
//! - Invalid render-target extents
//! - Pipeline asset validation, parsing and I/O errors
//!
//! A camera without valid culling parameters is **not** an error: it is
//! reported as [`CameraOutcome::Skipped`](crate::renderer::CameraOutcome::Skipped)
//! and the frame continues with the next camera.
//!
//! # Usage
//!
//! All fallible APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, PipelineError>`.
//!
//! ```rust,ignore
//! use toy_rp::errors::Result;
//!
//! fn load_pipeline() -> Result<()> {
//!     let asset = toy_rp::PipelineAsset::load("pipeline.json")?;
//!     asset.validate()?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for the deferred pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    // ========================================================================
    // Host / Rendering Errors
    // ========================================================================
    /// The host could not resolve a shader by name.
    #[error("Shader not found: {0}")]
    ShaderNotFound(String),

    /// A render target was requested with a zero dimension.
    #[error("Invalid render target extent: {width}x{height}")]
    InvalidExtent {
        /// Requested width in pixels
        width: u32,
        /// Requested height in pixels
        height: u32,
    },

    // ========================================================================
    // Asset Errors
    // ========================================================================
    /// The pipeline asset failed validation.
    #[error("Invalid pipeline asset: {0}")]
    InvalidAsset(String),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Alias for `Result<T, PipelineError>`.
pub type Result<T> = std::result::Result<T, PipelineError>;
