/*
 * Responsibility
 * - ServiceClient: elevated-privilege backend handle handed to every edge function
 * - ServiceClientFactory: builds one ServiceClient per request
 *   (production: GoTrue over a shared reqwest::Client, tests: any closure)
 */
use std::fmt;
use std::sync::Arc;

use url::Url;

use crate::config::Config;
use crate::services::auth::{GoTrueClient, IdentityBackend};

/// Backend handle with service-role privileges. Cheap to clone.
#[derive(Clone)]
pub struct ServiceClient {
    identity: Arc<dyn IdentityBackend>,
}

impl ServiceClient {
    pub fn new(identity: Arc<dyn IdentityBackend>) -> Self {
        Self { identity }
    }

    pub fn identity(&self) -> &dyn IdentityBackend {
        self.identity.as_ref()
    }
}

impl fmt::Debug for ServiceClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceClient")
            .field("identity", &self.identity.backend_name())
            .finish()
    }
}

pub trait ServiceClientFactory: Send + Sync + 'static {
    fn create(&self) -> ServiceClient;
}

impl<F> ServiceClientFactory for F
where
    F: Fn() -> ServiceClient + Send + Sync + 'static,
{
    fn create(&self) -> ServiceClient {
        self()
    }
}

/// Builds GoTrue-backed service clients from the project URL and service role key.
#[derive(Clone, Debug)]
pub struct SupabaseServiceFactory {
    http: reqwest::Client,
    base_url: Url,
    service_role_key: String,
}

impl SupabaseServiceFactory {
    pub fn new(http: reqwest::Client, base_url: Url, service_role_key: impl Into<String>) -> Self {
        Self {
            http,
            base_url,
            service_role_key: service_role_key.into(),
        }
    }

    pub fn from_config(http: reqwest::Client, config: &Config) -> Self {
        Self::new(
            http,
            config.supabase_url.clone(),
            config.service_role_key.clone(),
        )
    }
}

impl ServiceClientFactory for SupabaseServiceFactory {
    fn create(&self) -> ServiceClient {
        let gotrue = GoTrueClient::new(self.http.clone(), &self.base_url, &self.service_role_key);
        ServiceClient::new(Arc::new(gotrue))
    }
}
