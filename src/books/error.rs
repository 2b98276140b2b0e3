use miette::Diagnostic;
use thiserror::Error;

/// Failures talking to the book catalog.
///
/// The display strings are what MCP callers see after an `Error: ` prefix.
#[derive(Error, Diagnostic, Debug)]
pub enum BookError {
    #[error("API returned status {status}")]
    #[diagnostic(code(jot::books::status))]
    Status { status: u16 },

    #[error("Connection error: {message}")]
    #[diagnostic(code(jot::books::request))]
    Request { message: String },

    #[error("Internal error: {message}")]
    #[diagnostic(code(jot::books::decode))]
    Decode { message: String },

    #[error("Internal error: {message}")]
    #[diagnostic(code(jot::books::client))]
    Client { message: String },
}
