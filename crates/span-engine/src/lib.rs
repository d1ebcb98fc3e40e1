//! # Sonus Span Engine
//!
//! Consolidation of predicted sound-annotation spans in drama markup.
//!
//! ## Philosophy
//!
//! A sequence tagger marks character and ambient sounds as inline spans.
//! Its raw output is noisy: fragments of one event split apart, one-word
//! spans around pronouns, overlapping kinds. The engine rewrites the
//! markup so that:
//! - The rendered text of every element is left intact (only whitespace
//!   and commas inside merged spans are normalized)
//! - Adjacent spans describing one event become one span
//! - Spans carrying no sound are unwrapped, never deleted with their text
//!
//! ## Architecture
//!
//! ```text
//! Node tree (parsed markup)
//!     │
//!     ├──> Pre-order visit, per element:
//!     │    ├─> merge        adjacent same-kind spans
//!     │    ├─> vacuous      one-word spans (stoplist / word class / length)
//!     │    ├─> arbitration  adjacent different-kind spans, longer wins
//!     │    ├─> dedup        same-kind pairs not separated by a finite verb
//!     │    ├─> disjoint     target-kind spans across a plain gap element
//!     │    └─> pattern      "Die Geräusche ... hörbar" phrases in host text
//!     │
//!     └──> Attribution scrub of speaker labels
//! ```
//!
//! All text moves go through [`ownership`], which keeps the tail/leading
//! text slots consistent.
//!
//! ## Example
//!
//! ```rust
//! use sonus_span_engine::{EngineConfig, Node, SpanEngine};
//!
//! let engine = SpanEngine::new(EngineConfig::default()).unwrap();
//!
//! let mut stage = Node::element("stage")
//!     .with_child(Node::element("character_sound").with_text("klopft").with_tail(", "))
//!     .with_child(Node::element("character_sound").with_text("laut"));
//!
//! let report = engine.consolidate(&mut stage).unwrap();
//! assert_eq!(report.merged, 1);
//! assert_eq!(stage.children[0].text, "klopft laut");
//! ```

mod config;
mod engine;
mod error;
mod linguistic;
pub mod ownership;
pub mod passes;
mod types;

pub use config::{ClassifierConfig, EngineConfig, PatternConfig, AMBIENT_SOUND, CHARACTER_SOUND};
pub use engine::{ConsolidationReport, SpanEngine};
pub use error::{Result, SpanEngineError, TaggerError};
pub use linguistic::{Classifier, LexiconTagger, PartOfSpeech, Tagger, Token, VerbForm};
pub use ownership::{absorb, reassign_trailing, remove_child, unwrap_child};
pub use types::{Node, NodeKind};
