//! User aggregate and its validated components.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Minimum age accepted for a user record.
pub const MIN_AGE: u32 = 14;
/// Maximum length of a user name, in characters.
pub const NAME_MAX: usize = 255;
/// Maximum length of an email address, in characters.
pub const EMAIL_MAX: usize = 255;

/// Validation errors raised while building user components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyName,
    NameTooLong { max: usize },
    EmptyEmail,
    EmailTooLong { max: usize },
    MalformedEmail,
}

impl UserValidationError {
    /// Request field the failure relates to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyName | Self::NameTooLong { .. } => "name",
            Self::EmptyEmail | Self::EmailTooLong { .. } | Self::MalformedEmail => "email",
        }
    }
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "user name must not be empty"),
            Self::NameTooLong { max } => write!(f, "user name must be at most {max} characters"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmailTooLong { max } => write!(f, "email must be at most {max} characters"),
            Self::MalformedEmail => write!(f, "email must look like local@domain"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Identifier assigned by the repository when a user is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for UserId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Key used to look a user up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserLookup {
    Id(UserId),
    Name(String),
}

impl fmt::Display for UserLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id {id}"),
            Self::Name(name) => write!(f, "name {name:?}"),
        }
    }
}

impl From<UserId> for UserLookup {
    fn from(value: UserId) -> Self {
        Self::Id(value)
    }
}

impl From<&str> for UserLookup {
    fn from(value: &str) -> Self {
        Self::Name(value.to_owned())
    }
}

/// Non-blank user name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Validate and construct a [`UserName`].
    pub fn new(name: impl Into<String>) -> Result<Self, UserValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        if name.chars().count() > NAME_MAX {
            return Err(UserValidationError::NameTooLong { max: NAME_MAX });
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Email address used as an alternate contact key.
///
/// Only the shape `local@domain` is checked; deliverability is not.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and construct an [`Email`].
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let email = email.into();
        if email.trim().is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if email.chars().count() > EMAIL_MAX {
            return Err(UserValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        let well_formed = !email.chars().any(char::is_whitespace)
            && email
                .split_once('@')
                .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
        if !well_formed {
            return Err(UserValidationError::MalformedEmail);
        }
        Ok(Self(email))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Stored user record.
///
/// ## Invariants
/// - `id` is unique among live records and never changes.
/// - `name` is non-blank.
///
/// Serialises as `{"id": 1, "name": "Alice", "age": 27}` with `email` present
/// only when set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    #[schema(value_type = u64, example = 1)]
    id: UserId,
    #[schema(value_type = String, example = "Alice")]
    name: UserName,
    #[schema(example = 27)]
    age: u32,
    #[schema(value_type = Option<String>, example = "alice@example.com")]
    email: Option<Email>,
}

impl User {
    /// Assemble a user from validated parts.
    pub fn new(id: UserId, name: UserName, age: u32, email: Option<Email>) -> Self {
        Self {
            id,
            name,
            age,
            email,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &UserName {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn email(&self) -> Option<&Email> {
        self.email.as_ref()
    }

    /// Overwrite the mutable fields in place.
    pub fn apply(&mut self, changes: UserChanges) {
        let UserChanges { name, age } = changes;
        self.name = name;
        self.age = age;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserDto {
    id: u64,
    name: String,
    age: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let User {
            id,
            name,
            age,
            email,
        } = value;
        Self {
            id: id.get(),
            name: name.into(),
            age,
            email: email.map(String::from),
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        let email = value.email.map(Email::new).transpose()?;
        Ok(Self::new(
            UserId::new(value.id),
            UserName::new(value.name)?,
            value.age,
            email,
        ))
    }
}

/// Data for a record that has not been stored yet.
///
/// Carries no business rules; the service validates age before handing it
/// to a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    name: UserName,
    age: u32,
    email: Option<Email>,
}

impl NewUser {
    pub fn new(name: UserName, age: u32) -> Self {
        Self {
            name,
            age,
            email: None,
        }
    }

    #[must_use]
    pub fn with_email(mut self, email: Option<Email>) -> Self {
        self.email = email;
        self
    }

    pub fn name(&self) -> &UserName {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn email(&self) -> Option<&Email> {
        self.email.as_ref()
    }

    /// Promote to a stored record under `id`.
    pub fn into_user(self, id: UserId) -> User {
        User::new(id, self.name, self.age, self.email)
    }
}

/// Full replacement values for an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserChanges {
    pub name: UserName,
    pub age: u32,
}

/// Partial update; absent fields keep the stored value.
///
/// An age below [`MIN_AGE`] counts as absent, so it never replaces the
/// stored age.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub name: Option<UserName>,
    pub age: Option<u32>,
}

impl UserPatch {
    /// True when the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.accepted_age().is_none()
    }

    /// The patched age, if it meets [`MIN_AGE`].
    pub fn accepted_age(&self) -> Option<u32> {
        self.age.filter(|age| *age >= MIN_AGE)
    }

    /// Merge the patch over `current`, producing the values to store.
    ///
    /// # Examples
    /// ```
    /// use user_api::domain::{User, UserId, UserName, UserPatch};
    ///
    /// let alice = User::new(UserId::new(1), UserName::new("Alice").unwrap(), 27, None);
    /// let patch = UserPatch { name: None, age: Some(30) };
    /// let changes = patch.merge_onto(&alice);
    /// assert_eq!(changes.name.as_ref(), "Alice");
    /// assert_eq!(changes.age, 30);
    ///
    /// let too_young = UserPatch { name: None, age: Some(10) };
    /// assert_eq!(too_young.merge_onto(&alice).age, 27);
    /// ```
    pub fn merge_onto(self, current: &User) -> UserChanges {
        let age = self.accepted_age().unwrap_or(current.age());
        UserChanges {
            name: self.name.unwrap_or_else(|| current.name().clone()),
            age,
        }
    }
}
