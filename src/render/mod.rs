//! Renderers from [`crate::report::ReportRecord`] to document formats.
//!
//! Both renderers are stateless, cover every field of the record, and emit
//! sections in the fixed collection order. Neither may silently drop a
//! field: an unavailable value renders an explicit marker.

pub mod html;
pub mod text;

pub use html::render_html;
pub use text::render_text;
