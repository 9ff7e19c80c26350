/*
 * Responsibility
 * - shared context bound to the Router (AppState)
 *   - services: builds the per-request service client
 *   - upstream: outbound HTTP capability for forwarding functions
 * - cheap to Clone (everything inside is Arc)
 */
use std::sync::Arc;

use url::Url;

use crate::services::ServiceClientFactory;
use crate::services::upstream::UpstreamClient;

#[derive(Clone)]
pub struct AppState {
    pub services: Arc<dyn ServiceClientFactory>,
    pub upstream: Arc<dyn UpstreamClient>,
    pub random_dog_url: Url,
}

impl AppState {
    pub fn new(
        services: Arc<dyn ServiceClientFactory>,
        upstream: Arc<dyn UpstreamClient>,
        random_dog_url: Url,
    ) -> Self {
        Self {
            services,
            upstream,
            random_dog_url,
        }
    }
}
