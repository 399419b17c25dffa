//! Claim — a single unit of argument text.
//!
//! Claims are the building blocks of arguments: every conclusion and every
//! premise is a claim. Two claims are the same claim exactly when their text
//! is identical, which lets backends store each distinct text once.

use std::{borrow::Borrow, fmt, ops::Deref, sync::Arc};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An immutable piece of text used as a conclusion or a premise.
///
/// Cloning is cheap — the text is reference-counted, so a backend can hand
/// out the same allocation for every use of an identical claim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Claim(Arc<str>);

impl Claim {
  pub fn as_str(&self) -> &str { &self.0 }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl Deref for Claim {
  type Target = str;

  fn deref(&self) -> &str { &self.0 }
}

impl AsRef<str> for Claim {
  fn as_ref(&self) -> &str { &self.0 }
}

// Lets `HashSet<Claim>` be probed with a plain `&str`.
impl Borrow<str> for Claim {
  fn borrow(&self) -> &str { &self.0 }
}

impl fmt::Display for Claim {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for Claim {
  fn from(text: &str) -> Self { Self(text.into()) }
}

impl From<String> for Claim {
  fn from(text: String) -> Self { Self(text.into()) }
}

impl From<&String> for Claim {
  fn from(text: &String) -> Self { Self(text.as_str().into()) }
}

impl PartialEq<str> for Claim {
  fn eq(&self, other: &str) -> bool { &*self.0 == other }
}

impl PartialEq<&str> for Claim {
  fn eq(&self, other: &&str) -> bool { &*self.0 == *other }
}

impl PartialEq<String> for Claim {
  fn eq(&self, other: &String) -> bool { &*self.0 == other.as_str() }
}

// ─── Serde ───────────────────────────────────────────────────────────────────

// Claims travel as plain JSON strings.

impl Serialize for Claim {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&self.0)
  }
}

impl<'de> Deserialize<'de> for Claim {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    String::deserialize(deserializer).map(Self::from)
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use super::*;

  #[test]
  fn identity_is_exact_text() {
    assert_eq!(Claim::from("All men are mortal"), Claim::from("All men are mortal".to_string()));
    assert_ne!(Claim::from("All men are mortal"), Claim::from("all men are mortal"));
  }

  #[test]
  fn set_lookup_by_str() {
    let mut set = HashSet::new();
    set.insert(Claim::from("Socrates is a man"));
    assert!(set.contains("Socrates is a man"));
    assert!(!set.contains("Socrates is a human"));
  }

  #[test]
  fn serializes_as_plain_string() {
    let claim = Claim::from("Socrates is mortal");
    assert_eq!(serde_json::to_string(&claim).unwrap(), "\"Socrates is mortal\"");

    let back: Claim = serde_json::from_str("\"Socrates is mortal\"").unwrap();
    assert_eq!(back, claim);
  }
}
