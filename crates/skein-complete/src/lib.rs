//! Script-address completion for Skein projects.
//!
//! Three small pieces, wired together by the language server: the trigger
//! detector decides whether the caret sits inside an address literal, the
//! resolver walks the project index to collect every entity reachable from
//! the script, and the formatter turns entities into display suggestions.
//! Everything here is pure and synchronous — the index is passed in by
//! reference, so each completion request works on one consistent snapshot.

/// Hierarchical URL resolution over the project index.
pub mod resolve;
/// Suggestion type and entity formatting.
pub mod suggest;
/// Caret-context trigger detection.
pub mod trigger;

/// Re-export the resolver entry point.
pub use resolve::resolve;
/// Re-export suggestion types.
pub use suggest::{Suggestion, SuggestionKind};
/// Re-export the trigger predicate.
pub use trigger::should_trigger;
