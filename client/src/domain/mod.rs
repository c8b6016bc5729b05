//! Domain entities, value types, and ports.
//!
//! Entities are plain data holders decoded from backend rows; validated
//! newtypes guard the write path. Ports define the edges of the client:
//! driven ports face the backend, driving ports face the user store.

pub mod error;
pub mod field_update;
pub mod ids;
pub mod ports;
pub mod post;
pub mod user;

pub use self::error::{Error, ErrorCode};
pub use self::field_update::FieldUpdate;
pub use self::ids::{IdParseError, PostId, PostMediaId, UserId};
pub use self::post::{MediaKind, Post, PostMedia, PostText, PostValidationError};
pub use self::user::{
    DisplayNameText, ScreenName, SelfIntroduction, SuiteUser, User, UserDetail, UserProfile,
    UserValidationError,
};
