//! Make pixels near a set of key colors fully transparent.
//!
//! ```no_run
//! use colorkey::{apply, color::Color};
//! use std::path::Path;
//!
//! let stats = apply(
//!     Path::new("in.jpg"),
//!     Path::new("out.png"),
//!     vec![Color::new(217, 219, 222), Color::new(255, 255, 255)],
//!     45.0,
//! )?;
//! println!("removed {} pixels", stats.removed);
//! # Ok::<(), colorkey::error::Error>(())
//! ```

pub mod apply;
pub mod color;
pub mod error;
pub mod filter;
pub mod io;
pub mod logger;

pub use apply::{apply, apply_with};
