//! Session credentials
//!
//! Credential types, the `SessionStore` seam used by the acceptance flow,
//! and resolution of the pending token and API URL.

mod models;
mod resolve;
mod store;

pub use models::{ActivatedCredential, Credential, InvitationToken, PendingCredential, SessionFile};
pub use resolve::{ApiUrlResolver, TokenResolver};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};
