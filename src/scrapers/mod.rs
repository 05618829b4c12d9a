//! Trending page scrapers.
//!
//! | Source | Module | Method |
//! |--------|--------|--------|
//! | GitHub Trending | [`github`] | HTML scraping, default + zh locale |

pub mod github;
