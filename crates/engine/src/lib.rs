//! LevelUp Engine library.
//!
//! Runs the level-advancement wizard against a class catalog and a character
//! store.
//!
//! ## Structure
//!
//! - `use_cases/` - The level-up wizard and its per-step state machines
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
