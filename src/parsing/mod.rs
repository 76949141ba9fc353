//! Line-level parsing building blocks.
//!
//! - [`normalize`] - strips locale artifacts from raw export lines
//! - [`whatsapp`] - header grammar, date order detection, author split
//!
//! [`TranscriptParser`](crate::parser::TranscriptParser) wires these together.

pub mod normalize;
pub mod whatsapp;

pub use normalize::LineNormalizer;
pub use whatsapp::{Header, detect_date_order, header_timestamp, match_header, split_author};
