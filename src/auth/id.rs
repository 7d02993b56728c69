//! Strongly typed identifiers enforced across the broker domain.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

macro_rules! def_id {
	($name:ident, $doc:literal, $kind:literal) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Creates a new identifier after validation.
			pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
				let view = value.as_ref();

				validate_view($kind, view)?;

				Ok(Self(view.to_owned()))
			}
		}
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &Self::Target {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				validate_view($kind, &value)?;

				Ok(Self(value))
			}
		}
		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, concat!($kind, "({})"), self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
		impl FromStr for $name {
			type Err = IdentifierError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::new(s)
			}
		}
	};
}

const IDENTIFIER_MAX_LEN: usize = 128;
const EMAIL_MAX_LEN: usize = 254;
const DISPLAY_NAME_MAX_LEN: usize = 64;

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("{kind} identifier cannot be empty.")]
	Empty {
		/// Kind of identifier (user, token).
		kind: &'static str,
	},
	/// The identifier contains whitespace characters.
	#[error("{kind} identifier contains whitespace.")]
	ContainsWhitespace {
		/// Kind of identifier (user, token).
		kind: &'static str,
	},
	/// The identifier exceeded the allowed character count.
	#[error("{kind} identifier exceeds {max} characters.")]
	TooLong {
		/// Kind of identifier (user, token).
		kind: &'static str,
		/// Maximum permitted character count.
		max: usize,
	},
}

def_id! { UserId, "Opaque identifier for a credential subject, assigned by the store.", "User" }
def_id! { TokenId, "Opaque identifier for a persisted token row, assigned by the store.", "Token" }

fn validate_view(kind: &'static str, view: &str) -> Result<(), IdentifierError> {
	if view.is_empty() {
		return Err(IdentifierError::Empty { kind });
	}
	if view.chars().any(char::is_whitespace) {
		return Err(IdentifierError::ContainsWhitespace { kind });
	}
	if view.len() > IDENTIFIER_MAX_LEN {
		return Err(IdentifierError::TooLong { kind, max: IDENTIFIER_MAX_LEN });
	}

	Ok(())
}

/// Error returned when an email address fails structural validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum EmailAddressError {
	/// The address was empty.
	#[error("Email address cannot be empty.")]
	Empty,
	/// The address is not of the `local@domain.tld` shape.
	#[error("Email address is malformed.")]
	Malformed,
	/// The address exceeded the allowed character count.
	#[error("Email address exceeds {max} characters.")]
	TooLong {
		/// Maximum permitted character count.
		max: usize,
	},
}

/// Owner address for accounts and tokens, validated structurally on construction.
///
/// Addresses are stored verbatim; no case folding or normalization is applied, so the
/// value persisted on verification is exactly the one the token was issued for.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);
impl EmailAddress {
	/// Creates a new address after validation.
	pub fn new(value: impl AsRef<str>) -> Result<Self, EmailAddressError> {
		let view = value.as_ref();

		validate_email(view)?;

		Ok(Self(view.to_owned()))
	}
}
impl Deref for EmailAddress {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for EmailAddress {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl From<EmailAddress> for String {
	fn from(value: EmailAddress) -> Self {
		value.0
	}
}
impl TryFrom<String> for EmailAddress {
	type Error = EmailAddressError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		validate_email(&value)?;

		Ok(Self(value))
	}
}
impl Borrow<str> for EmailAddress {
	fn borrow(&self) -> &str {
		&self.0
	}
}
impl Debug for EmailAddress {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Email({})", self.0)
	}
}
impl Display for EmailAddress {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
impl FromStr for EmailAddress {
	type Err = EmailAddressError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}

fn validate_email(view: &str) -> Result<(), EmailAddressError> {
	if view.is_empty() {
		return Err(EmailAddressError::Empty);
	}
	if view.len() > EMAIL_MAX_LEN {
		return Err(EmailAddressError::TooLong { max: EMAIL_MAX_LEN });
	}
	if view.chars().any(char::is_whitespace) {
		return Err(EmailAddressError::Malformed);
	}

	let Some((local, domain)) = view.split_once('@') else {
		return Err(EmailAddressError::Malformed);
	};

	if local.is_empty() || domain.is_empty() || domain.contains('@') {
		return Err(EmailAddressError::Malformed);
	}
	if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
		return Err(EmailAddressError::Malformed);
	}

	Ok(())
}

/// Error returned when a display name fails validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum DisplayNameError {
	/// The name was empty or whitespace-only.
	#[error("Display name cannot be empty.")]
	Empty,
	/// The name exceeded the allowed character count.
	#[error("Display name exceeds {max} characters.")]
	TooLong {
		/// Maximum permitted character count.
		max: usize,
	},
}

/// Human-readable account name; interior whitespace is allowed, surrounding is trimmed.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);
impl DisplayName {
	/// Creates a new name after trimming and validation.
	pub fn new(value: impl AsRef<str>) -> Result<Self, DisplayNameError> {
		let view = value.as_ref().trim();

		if view.is_empty() {
			return Err(DisplayNameError::Empty);
		}
		if view.len() > DISPLAY_NAME_MAX_LEN {
			return Err(DisplayNameError::TooLong { max: DISPLAY_NAME_MAX_LEN });
		}

		Ok(Self(view.to_owned()))
	}
}
impl AsRef<str> for DisplayName {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl From<DisplayName> for String {
	fn from(value: DisplayName) -> Self {
		value.0
	}
}
impl TryFrom<String> for DisplayName {
	type Error = DisplayNameError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}
impl Debug for DisplayName {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "DisplayName({})", self.0)
	}
}
impl Display for DisplayName {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
