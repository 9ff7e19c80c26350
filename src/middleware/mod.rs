/*
 * Responsibility
 * - public interface of the middleware layer
 * - cors: the shared CORS header set, http: transport-level layers
 */
pub mod cors;
pub mod http;
