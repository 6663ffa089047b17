pub mod args;
pub mod error;
pub mod image_io;
pub mod mask_search;

pub use error::{MaskSearchError, MaskSearchResult};
pub use mask_search::{MaskMatcher, MatchSet, SearchConfig};
