//! Rendering module for converting document trees to HTML and JSON.

mod html;
mod json;
mod options;
mod result;

pub use html::{to_html, HtmlRenderer};
pub use json::{to_json, JsonFormat};
pub use options::RenderOptions;
pub use result::RenderResult;
