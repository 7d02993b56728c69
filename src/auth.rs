//! Auth-domain identifiers, credential material, accounts, and token models.

pub mod id;
pub mod password;
pub mod token;
pub mod user;

pub use id::*;
pub use password::*;
pub use token::{kind::*, record::*, secret::*};
pub use user::*;
