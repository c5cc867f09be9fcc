//! C-ABI FFI bindings for cross-language integration.
//!
//! Exposes rendering to C, C#, Python, Node.js and other hosts that can
//! load a `cdylib`. Every returned [`Rst2HtmlResult`] owns its strings and
//! must be released with [`rst2html_free_result`].

use std::ffi::{c_char, CStr, CString};
use std::path::Path;
use std::ptr;

use crate::render::{JsonFormat, RenderOptions};
use crate::{render, render_file, render_json_tree, DocumentParser, ParseOptions, RstParser};

/// Result structure returned by FFI functions.
#[repr(C)]
pub struct Rst2HtmlResult {
    /// Whether the operation succeeded.
    pub success: bool,
    /// The result data (null if failed). Must be freed with `rst2html_free_string`.
    pub data: *mut c_char,
    /// Error message (null if succeeded). Must be freed with `rst2html_free_string`.
    pub error: *mut c_char,
}

impl Rst2HtmlResult {
    fn success(data: String) -> Self {
        match CString::new(data) {
            Ok(data) => Self {
                success: true,
                data: data.into_raw(),
                error: ptr::null_mut(),
            },
            Err(e) => Self::error(format!(
                "Output contains a NUL byte at position {}",
                e.nul_position()
            )),
        }
    }

    fn error(message: String) -> Self {
        Self {
            success: false,
            data: ptr::null_mut(),
            error: CString::new(message).unwrap_or_default().into_raw(),
        }
    }

    fn from_result(result: crate::Result<String>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(e) => Self::error(e.to_string()),
        }
    }
}

/// Borrow a C string argument as UTF-8.
unsafe fn read_str<'a>(ptr: *const c_char, name: &str) -> Result<&'a str, Rst2HtmlResult> {
    if ptr.is_null() {
        return Err(Rst2HtmlResult::error(format!("{} cannot be null", name)));
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map_err(|_| Rst2HtmlResult::error(format!("Invalid UTF-8 {}", name)))
}

fn options_for(indent: u32) -> RenderOptions {
    RenderOptions::default().with_indent(indent as usize)
}

/// Render reStructuredText source to HTML.
///
/// # Safety
///
/// The `source` must be a valid null-terminated UTF-8 string.
/// The returned result must be freed with `rst2html_free_result`.
#[no_mangle]
pub unsafe extern "C" fn rst2html_render(source: *const c_char, indent: u32) -> Rst2HtmlResult {
    let source = match read_str(source, "source") {
        Ok(s) => s,
        Err(result) => return result,
    };

    Rst2HtmlResult::from_result(
        RstParser::new()
            .parse(source)
            .map(|doc| render::to_html(&doc, &options_for(indent))),
    )
}

/// Render a JSON document tree to HTML.
///
/// # Safety
///
/// The `json` must be a valid null-terminated UTF-8 string.
/// The returned result must be freed with `rst2html_free_result`.
#[no_mangle]
pub unsafe extern "C" fn rst2html_render_json_tree(
    json: *const c_char,
    indent: u32,
) -> Rst2HtmlResult {
    let json = match read_str(json, "json") {
        Ok(s) => s,
        Err(result) => return result,
    };

    Rst2HtmlResult::from_result(render_json_tree(json, &options_for(indent)))
}

/// Render a reStructuredText file to HTML.
///
/// # Safety
///
/// The `path` must be a valid null-terminated UTF-8 string.
/// The returned result must be freed with `rst2html_free_result`.
#[no_mangle]
pub unsafe extern "C" fn rst2html_render_file(path: *const c_char, indent: u32) -> Rst2HtmlResult {
    let path = match read_str(path, "path") {
        Ok(s) => s,
        Err(result) => return result,
    };

    Rst2HtmlResult::from_result(render_file(Path::new(path), &options_for(indent)))
}

/// Parse reStructuredText source and return the tree as JSON.
///
/// # Safety
///
/// The `source` must be a valid null-terminated UTF-8 string.
/// The returned result must be freed with `rst2html_free_result`.
#[no_mangle]
pub unsafe extern "C" fn rst2html_parse_to_json(
    source: *const c_char,
    pretty: bool,
    strict: bool,
) -> Rst2HtmlResult {
    let source = match read_str(source, "source") {
        Ok(s) => s,
        Err(result) => return result,
    };

    let format = if pretty {
        JsonFormat::Pretty
    } else {
        JsonFormat::Compact
    };
    let options = if strict {
        ParseOptions::new().strict()
    } else {
        ParseOptions::new()
    };

    Rst2HtmlResult::from_result(
        RstParser::with_options(options)
            .parse(source)
            .and_then(|doc| render::to_json(&doc, format)),
    )
}

/// Free a result returned by any rst2html function.
///
/// # Safety
///
/// The `result` must have been returned by an rst2html function.
/// This function should only be called once per result.
#[no_mangle]
pub unsafe extern "C" fn rst2html_free_result(result: Rst2HtmlResult) {
    if !result.data.is_null() {
        drop(CString::from_raw(result.data));
    }
    if !result.error.is_null() {
        drop(CString::from_raw(result.error));
    }
}

/// Free a string allocated by rst2html.
///
/// # Safety
///
/// The `ptr` must have been allocated by rst2html.
/// This function should only be called once per pointer.
#[no_mangle]
pub unsafe extern "C" fn rst2html_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

/// Get the version of the rst2html library.
///
/// The returned string is statically allocated and must not be freed.
#[no_mangle]
pub extern "C" fn rst2html_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}
