//! # IAM Console Repository
//!
//! Access to the identity service's users, groups and policies.
//!
//! ```text
//! DataRepository         │  IdentityProvider (port)
//! ───────────────────────┼────────────────────────────
//!   initialize()         │  connect()        ← PlaceholderProvider
//!   load_users()         │  list_users()
//!   load_policies()      │  list_policies()  (per compartment)
//!   load_groups()        │  list_groups()
//! ```
//!
//! The only adapter today is [`PlaceholderProvider`], which serves fixed
//! records until an SDK-backed provider exists.

pub mod data_repository;
pub mod error;
pub mod placeholder;
pub mod profiles;
pub mod provider;

pub use data_repository::DataRepository;
pub use error::{RepositoryError, Result};
pub use placeholder::PlaceholderProvider;
pub use profiles::{discover_profiles, default_oci_config_path, DEFAULT_PROFILE};
pub use provider::{AuthMethod, IdentityProvider, InitOptions};
