//! Supabase-backed client SDK for the Suite social network.
//!
//! The crate follows a hexagonal layout: `domain` holds entities, value
//! types, and the port traits; `usecase` sequences port calls, one struct
//! per user intent; `outbound::supabase` adapts the ports onto the
//! PostgREST, Storage, and GoTrue surfaces; `store` caches per-user
//! presentation state; [`app::App`] wires the graph from [`config`].
//!
//! ```rust,ignore
//! let settings = SupabaseSettings::load()?;
//! let app = App::connect(&settings)?;
//! app.store().fetch_user(&user_id).await;
//! ```

pub mod app;
pub mod config;
pub mod domain;
pub mod outbound;
pub mod store;
pub mod usecase;

pub use app::{App, SuiteUserStore};
pub use config::SupabaseSettings;
pub use domain::{Error, ErrorCode};
pub use store::{CachedUserEntry, UserStore};
