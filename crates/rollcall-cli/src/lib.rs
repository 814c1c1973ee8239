//! # Rollcall CLI
//!
//! Sample-data seeding and teacher account management, shared by the
//! `rollcall-cli` binary and the API server's startup seeding.
//!
//! ```ignore
//! use rollcall_cli::seeder::{seed_sample_data, SeedOptions};
//!
//! let outcome = seed_sample_data(store.as_ref(), SeedOptions::default()).await?;
//! ```

pub mod seeder;
pub mod teachers;

pub use seeder::{SeedError, SeedOptions, SeedOutcome, seed_sample_data};
pub use teachers::{CreateTeacherError, create_teacher};
