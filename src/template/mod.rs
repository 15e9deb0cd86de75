//! Alert templates
//!
//! Placeholder substitution and rendering of per-(type, subtype) templates.

pub mod renderer;
pub mod substitute;

pub use renderer::{render_text, RenderRequest, TemplateRenderer};
pub use substitute::{scalar_to_string, substitute_with, Variables};
