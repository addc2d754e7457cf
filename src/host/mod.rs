//! Host integration: builtins dispatched by name and arity

pub mod builtins;
pub mod value;

pub use builtins::{Builtin, Registry, Session};
pub use value::Value;
