//! CodeJudge - Submission Judging Engine
//!
//! This library provides the core functionality for the CodeJudge service:
//! it accepts code submissions, compiles and executes them in isolated
//! Docker containers against per-problem test cases, and publishes
//! verdicts.
//!
//! # Features
//!
//! - Multi-language support (C, C++, Rust, Go, Zig, Python)
//! - Isolated Docker container execution with time and memory limits
//! - All-or-nothing and partial-credit scoring
//! - Bounded worker pool with per-user fairness and cancellation
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Judge**: scheduling, sandboxing and verdict computation
//! - **Store**: collaborator traits for problems and submissions
//! - **Models**: domain models and DTOs

pub mod config;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod judge;
pub mod models;
pub mod state;
pub mod store;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
