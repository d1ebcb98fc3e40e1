//! # Sonus TEI I/O
//!
//! Loads drama markup into the [`sonus_span_engine::Node`] tree and writes
//! it back.
//!
//! The tree keeps the character data exactly: every run of text lands in
//! the leading-text or tail slot it came from, so rendering a parsed
//! document yields the same text as the source. Comments and processing
//! instructions survive inside the root; the prolog and epilog survive
//! around it.
//!
//! ```rust
//! use sonus_tei_io::{parse_document, write_document};
//!
//! let doc = parse_document("<stage>Er <character_sound>klopft</character_sound>.</stage>").unwrap();
//! assert_eq!(doc.root.text_content(), "Er klopft.");
//!
//! let xml = write_document(&doc).unwrap();
//! assert!(xml.ends_with("<stage>Er <character_sound>klopft</character_sound>.</stage>\n"));
//! ```

mod error;
mod reader;
mod writer;

pub use error::{Result, TeiError};
pub use reader::{parse_document, read_document, Document, Misc, MAX_DEPTH};
pub use writer::{write_document, write_document_to};
