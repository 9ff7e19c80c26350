pub mod auth;
pub mod service_client;
pub mod upstream;

pub use service_client::{ServiceClient, ServiceClientFactory, SupabaseServiceFactory};
