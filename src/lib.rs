//! Reading, writing and reporting on CUE sheets and cdrdao TOC files.
//!
//! Both text formats are parsed into one [`Cd`] model, which can be
//! written back out in either format, split into track breakpoints, or
//! rendered through printf-like report templates.

pub mod breakpoints;
pub mod disc;
pub mod error;
pub mod files;
pub mod msf;
pub mod parser;
pub mod template;
pub mod writer;

pub use breakpoints::{GapMode, breakpoints};
pub use disc::{Cd, Cdtext, DiscMode, Pti, Track, TrackFlags, TrackMode};
pub use error::{CuekitError, CuekitResult};
pub use parser::{Format, parse, parse_str};
pub use template::{Selection, Templates, render, render_report};
