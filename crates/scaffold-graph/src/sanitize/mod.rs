//! Defensive validation of externally supplied state.
//!
//! Anything read from persistence or from an imported file is untrusted JSON.
//! Each candidate element goes through an explicit schema check that yields a
//! [`Checked`] value instead of panicking or erroring out:
//!
//! - flat graph state ([`sanitize_loaded_state`]): invalid nodes and edges
//!   are dropped one by one, a wrong top-level shape yields an empty state
//! - tree documents ([`sanitize_tree_document`]): all or nothing, failures
//!   are reported as [`ImportError`](crate::ImportError)
//! - [`ensure_root`] repairs or synthesizes the root organization before the
//!   state is handed to the live graph

mod flat;
mod root;
mod tree;

pub use flat::{check_edge, check_node, parse_stored_state, sanitize_loaded_state};
pub use root::ensure_root;
pub use tree::{check_tree_node, parse_tree_import, read_tree_import, sanitize_tree_document};

use crate::graph::{AttachedData, AttachedDataEntry, OrganizationIds, UserLocation, UserMetadata, UserRole};
use serde_json::{Map, Value};

/// Outcome of checking one candidate element.
#[derive(Debug, Clone, PartialEq)]
pub enum Checked<T> {
    /// The element is well formed
    Valid(T),
    /// The element was rejected; the payload says why
    Invalid(&'static str),
}

impl<T> Checked<T> {
    /// The valid value, if any.
    pub fn valid(self) -> Option<T> {
        match self {
            Checked::Valid(value) => Some(value),
            Checked::Invalid(_) => None,
        }
    }

    /// Whether the element passed.
    pub fn is_valid(&self) -> bool {
        matches!(self, Checked::Valid(_))
    }
}

impl<T> From<Check<T>> for Checked<T> {
    fn from(result: Check<T>) -> Self {
        match result {
            Ok(value) => Checked::Valid(value),
            Err(reason) => Checked::Invalid(reason),
        }
    }
}

/// Internal check result; `?`-friendly counterpart of [`Checked`].
pub(crate) type Check<T> = std::result::Result<T, &'static str>;

/// A field that is absent or JSON `null`.
fn is_absent(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

pub(crate) fn required_str<'v>(obj: &'v Map<String, Value>, key: &str, reason: &'static str) -> Check<&'v str> {
    obj.get(key).and_then(Value::as_str).ok_or(reason)
}

pub(crate) fn optional_string(value: Option<&Value>, reason: &'static str) -> Check<Option<String>> {
    if is_absent(value) {
        return Ok(None);
    }
    value
        .and_then(Value::as_str)
        .map(|s| Some(s.to_string()))
        .ok_or(reason)
}

pub(crate) fn check_organization_ids(value: Option<&Value>) -> Check<OrganizationIds> {
    if is_absent(value) {
        return Ok(OrganizationIds::new());
    }
    let items = value
        .and_then(Value::as_array)
        .ok_or("organization_ids is not an array")?;
    items
        .iter()
        .map(|item| item.as_str().ok_or("organization_ids contains a non-string"))
        .collect()
}

pub(crate) fn check_user_role(value: Option<&Value>) -> Check<Option<UserRole>> {
    if is_absent(value) {
        return Ok(None);
    }
    value
        .and_then(Value::as_str)
        .and_then(UserRole::from_tag)
        .map(Some)
        .ok_or("role is not one of viewer, moderator, admin")
}

pub(crate) fn check_user_metadata(value: Option<&Value>) -> Check<UserMetadata> {
    if is_absent(value) {
        return Ok(UserMetadata::default());
    }
    let obj = value
        .and_then(Value::as_object)
        .ok_or("user_metadata is not an object")?;

    let location = match obj.get("location") {
        None | Some(Value::Null) => UserLocation::default(),
        Some(Value::Object(loc)) => UserLocation {
            street: optional_string(loc.get("street"), "location.street is not a string")?,
            city: optional_string(loc.get("city"), "location.city is not a string")?,
            country: optional_string(loc.get("country"), "location.country is not a string")?,
        },
        Some(_) => return Err("user_metadata.location is not an object"),
    };

    Ok(UserMetadata {
        email: optional_string(obj.get("email"), "email is not a string")?,
        firstname: optional_string(obj.get("firstname"), "firstname is not a string")?,
        lastname: optional_string(obj.get("lastname"), "lastname is not a string")?,
        role: check_user_role(obj.get("role"))?,
        location,
    })
}

pub(crate) fn check_attached_data(value: Option<&Value>, what: &'static str) -> Check<AttachedData> {
    if is_absent(value) {
        return Ok(AttachedData::new());
    }
    let items = value.and_then(Value::as_array).ok_or(what)?;
    items
        .iter()
        .map(|item| -> Check<AttachedDataEntry> {
            let entry = item.as_object().ok_or(what)?;
            Ok(AttachedDataEntry::new(
                required_str(entry, "key", what)?,
                required_str(entry, "value", what)?,
            ))
        })
        .collect()
}
