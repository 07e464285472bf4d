//! Pipeline stages for blog post generation and export.
//!
//! Each submodule implements exactly one transformation step. Keeping stages
//! separate makes each independently testable and lets the HTTP layer and the
//! library share the same pure core.
//!
//! ## Data Flow
//!
//! ```text
//! request ──▶ prompt ──▶ completion ──▶ post ──▶ export
//! (notes)     (bundle)   (LLM call)    (HTML)   (md / html / jsx)
//! ```
//!
//! 1. [`prompt`]   — assemble the system/user prompt pair from the request
//! 2. `generate`   — the orchestrator in [`crate::generate`]; the only stage
//!    with network I/O
//! 3. [`markdown`] — HTML → Markdown tag walk for export
//! 4. [`react`]    — wrap the HTML in a React component stub
//! 5. [`export`]   — dispatch on the requested format and pick the filename

pub mod export;
pub mod markdown;
pub mod prompt;
pub mod react;
