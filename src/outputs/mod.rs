//! Digest output.
//!
//! - [`markdown`]: renders language sections and appends them to the day's file
//! - [`retention`]: deletes all but the newest digest files
//!
//! # Output Structure
//!
//! ```text
//! trending/
//! ├── 2025-05-05.md
//! └── 2025-05-06.md   # one section per language, appended in run order
//! ```

pub mod markdown;
pub mod retention;
