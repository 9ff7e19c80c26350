/*
 * Responsibility
 * - shared request-handling base for edge functions
 *   (preflight, optional auth guard, context construction, error envelope)
 */
pub mod context;
pub mod function;

pub use context::RequestContext;
pub use function::{ServeOptions, serve_edge_function};
