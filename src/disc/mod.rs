pub mod cdtext;
pub mod error;
pub mod models;

pub use cdtext::{Cdtext, Pti};
pub use error::{ModelError, ModelResult};
pub use models::{Cd, DiscMode, Track, TrackFlags, TrackMode};
