//! Shared domain types.

pub mod capability;
pub mod id;
pub mod role;
pub mod username;

pub use capability::{Capability, PermissionSet, is_granted};
pub use id::{AdminId, AnnouncementId, InterestId, ProductId, SubscriptionId};
pub use role::{Role, RoleParseError};
pub use username::{Username, UsernameError};
