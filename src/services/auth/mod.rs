pub mod authenticator;
pub mod gotrue;
pub mod guard;
pub mod identity;

pub use authenticator::{AuthOutcome, authenticate};
pub use gotrue::GoTrueClient;
pub use guard::require_authenticated;
pub use identity::{Identity, IdentityBackend, IdentityError};
