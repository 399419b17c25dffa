//! Arguments and their versions.
//!
//! An argument is a conclusion supported by an ordered set of premises. It is
//! never edited in place: every update appends a new, immutable version, and
//! the most recent version is the *live* one.

use serde::{Deserialize, Serialize};

use crate::{claim::Claim, error::ValidationError};

/// Durable argument identifier, assigned by the store on first save.
pub type ArgumentId = i64;

/// Per-argument version number. The first version is 1.
pub type VersionNumber = u32;

/// The minimum number of premises a well-formed argument carries.
pub const MIN_PREMISES: usize = 2;

/// The content of an argument before the store has assigned it an identity.
///
/// This is the input to [`ArgumentStore::save`](crate::store::ArgumentStore::save)
/// and [`ArgumentStore::update`](crate::store::ArgumentStore::update).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewArgument {
  pub conclusion: Claim,
  pub premises:   Vec<Claim>,
}

impl NewArgument {
  pub fn new<P>(conclusion: impl Into<Claim>, premises: P) -> Self
  where
    P: IntoIterator,
    P::Item: Into<Claim>,
  {
    Self {
      conclusion: conclusion.into(),
      premises:   premises.into_iter().map(Into::into).collect(),
    }
  }

  /// Check the structural rules: a non-empty conclusion and at least
  /// [`MIN_PREMISES`] premises, none of them empty. Repeated premises are
  /// allowed.
  pub fn validate(&self) -> Result<(), ValidationError> {
    if self.conclusion.is_empty() {
      return Err(ValidationError::MissingConclusion);
    }
    if self.premises.len() < MIN_PREMISES {
      return Err(ValidationError::TooFewPremises(self.premises.len()));
    }
    if let Some(index) = self.premises.iter().position(Claim::is_empty) {
      return Err(ValidationError::EmptyPremise(index));
    }
    Ok(())
  }
}

/// An immutable snapshot of one version of a stored argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
  pub id:         ArgumentId,
  pub version:    VersionNumber,
  pub conclusion: Claim,
  pub premises:   Vec<Claim>,
}

impl Argument {
  /// Strip the identity, leaving content that can be saved or used as an
  /// update.
  pub fn into_new(self) -> NewArgument {
    NewArgument { conclusion: self.conclusion, premises: self.premises }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn valid_argument_passes() {
    let arg = NewArgument::new("Socrates is mortal", ["Socrates is a man", "All men are mortal"]);
    assert!(arg.validate().is_ok());
  }

  #[test]
  fn duplicate_premises_are_allowed() {
    let arg = NewArgument::new("p", ["q", "q"]);
    assert!(arg.validate().is_ok());
  }

  #[test]
  fn empty_conclusion_rejected() {
    let arg = NewArgument::new("", ["a", "b"]);
    assert_eq!(arg.validate(), Err(ValidationError::MissingConclusion));
  }

  #[test]
  fn single_premise_rejected() {
    let arg = NewArgument::new("c", ["a"]);
    assert_eq!(arg.validate(), Err(ValidationError::TooFewPremises(1)));
  }

  #[test]
  fn empty_premise_reports_index() {
    let arg = NewArgument::new("c", ["a", "b", ""]);
    assert_eq!(arg.validate(), Err(ValidationError::EmptyPremise(2)));
    assert_eq!(
      ValidationError::EmptyPremise(2).to_string(),
      "argument premise[2] is empty, but must not be"
    );
  }

  #[test]
  fn snapshot_json_shape() {
    let arg = Argument {
      id:         1,
      version:    2,
      conclusion: "Socrates is mortal".into(),
      premises:   vec!["Socrates is a human".into(), "All men are mortal".into()],
    };
    let json = serde_json::to_value(&arg).unwrap();
    assert_eq!(
      json,
      serde_json::json!({
        "id": 1,
        "version": 2,
        "conclusion": "Socrates is mortal",
        "premises": ["Socrates is a human", "All men are mortal"],
      })
    );
  }
}
