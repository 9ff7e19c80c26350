/*
 * Responsibility
 * - response DTO of the greeting functions
 */
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct GreetingResponse {
    pub message: String,
}
