/// Invocation domain: request parsing, mask styles, and command assembly.
pub mod command;
pub mod errors;
pub mod mask;
pub mod request;

pub use command::{ToolCommand, ToolOptions};
pub use errors::WrapError;
pub use request::{InvocationRequest, RawRequest};
