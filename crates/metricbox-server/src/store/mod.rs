//! In-memory metric store.
//!
//! The registry owns every source and buffer; callers only ever hold names
//! and go through the registry's locked entry points.

mod buffer;
mod registry;
mod source;

pub use buffer::MetricBuffer;
pub use registry::Registry;
pub use source::Source;
