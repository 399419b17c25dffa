//! [`MemoryStore`] — the in-memory implementation of [`ArgumentStore`].

use std::{
  collections::HashSet,
  sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use dialectic_core::{
  Argument, ArgumentId, ArgumentStore, Claim, Error, FetchSomeOptions, NewArgument, Result,
  VersionNumber,
};

// ─── State ───────────────────────────────────────────────────────────────────

#[derive(Debug)]
struct State {
  /// Slot `i` holds the version history of argument `i`, oldest first, so
  /// version `n` lives at index `n - 1`. Slot 0 is never used, which makes
  /// IDs start at 1. `None` means the argument never existed or was deleted.
  slots:  Vec<Option<Vec<Argument>>>,
  /// Every distinct claim text seen so far.
  claims: HashSet<Claim>,
}

impl Default for State {
  fn default() -> Self { Self { slots: vec![None], claims: HashSet::new() } }
}

impl State {
  fn slot_index(&self, id: ArgumentId) -> Option<usize> {
    usize::try_from(id).ok().filter(|&i| i > 0 && i < self.slots.len())
  }

  fn history(&self, id: ArgumentId) -> Option<&Vec<Argument>> {
    self.slot_index(id).and_then(|i| self.slots[i].as_ref())
  }

  fn history_mut(&mut self, id: ArgumentId) -> Option<&mut Vec<Argument>> {
    self.slot_index(id).and_then(|i| self.slots[i].as_mut())
  }

  /// Return the shared copy of `claim`, registering it if it is new.
  fn intern(&mut self, claim: Claim) -> Claim {
    if let Some(existing) = self.claims.get(claim.as_str()) {
      return existing.clone();
    }
    self.claims.insert(claim.clone());
    claim
  }

  fn snapshot(&mut self, id: ArgumentId, version: VersionNumber, input: NewArgument) -> Argument {
    let conclusion = self.intern(input.conclusion);
    let premises = input.premises.into_iter().map(|p| self.intern(p)).collect();
    Argument { id, version, conclusion, premises }
  }

  fn live(&self) -> impl Iterator<Item = &Argument> {
    self.slots.iter().filter_map(|slot| slot.as_ref()?.last())
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// An argument store held entirely in process memory.
///
/// Cloning is cheap — clones share the same underlying data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  state: Arc<RwLock<State>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  fn read(&self) -> Result<RwLockReadGuard<'_, State>> {
    self.state.read().map_err(|_| Error::Backend("poisoned lock: memory store".into()))
  }

  fn write(&self) -> Result<RwLockWriteGuard<'_, State>> {
    self.state.write().map_err(|_| Error::Backend("poisoned lock: memory store".into()))
  }

  /// Number of distinct claim texts held by the store.
  pub fn claim_count(&self) -> Result<usize> { Ok(self.read()?.claims.len()) }
}

// ─── ArgumentStore impl ──────────────────────────────────────────────────────

impl ArgumentStore for MemoryStore {
  type Error = Error;

  async fn save(&self, argument: NewArgument) -> Result<ArgumentId> {
    argument.validate()?;

    let mut state = self.write()?;
    let id = ArgumentId::try_from(state.slots.len())
      .map_err(|_| Error::Backend("argument id space exhausted".into()))?;
    let first = state.snapshot(id, 1, argument);
    state.slots.push(Some(vec![first]));

    tracing::debug!(argument_id = id, "saved argument");
    Ok(id)
  }

  async fn update(&self, id: ArgumentId, argument: NewArgument) -> Result<VersionNumber> {
    argument.validate()?;

    let mut state = self.write()?;
    let next = match state.history(id) {
      Some(history) => VersionNumber::try_from(history.len() + 1)
        .map_err(|_| Error::Backend(format!("argument {id} has too many versions")))?,
      None => return Err(Error::argument_not_found(id)),
    };
    let snapshot = state.snapshot(id, next, argument);
    if let Some(history) = state.history_mut(id) {
      history.push(snapshot);
    }

    tracing::debug!(argument_id = id, version = next, "updated argument");
    Ok(next)
  }

  async fn delete(&self, id: ArgumentId) -> Result<()> {
    let mut state = self.write()?;
    let cleared = match state.slot_index(id) {
      Some(i) => state.slots[i].take(),
      None => None,
    };
    if cleared.is_none() {
      return Err(Error::argument_not_found(id));
    }

    tracing::debug!(argument_id = id, "deleted argument");
    Ok(())
  }

  async fn fetch_live(&self, id: ArgumentId) -> Result<Argument> {
    let state = self.read()?;
    state
      .history(id)
      .and_then(|history| history.last())
      .cloned()
      .ok_or_else(|| Error::argument_not_found(id))
  }

  async fn fetch_version(&self, id: ArgumentId, version: VersionNumber) -> Result<Argument> {
    let state = self.read()?;
    let history = state.history(id).ok_or_else(|| Error::argument_not_found(id))?;
    (version as usize)
      .checked_sub(1)
      .and_then(|i| history.get(i))
      .cloned()
      .ok_or_else(|| Error::version_not_found(id, version))
  }

  async fn fetch_some(&self, options: &FetchSomeOptions) -> Result<Vec<Argument>> {
    let state = self.read()?;
    let count = match options.count {
      0 => usize::MAX,
      n => n,
    };

    let found: Vec<Argument> = state
      .live()
      .filter(|arg| !options.exclude.contains(&arg.id))
      .filter(|arg| options.conclusion.as_deref().is_none_or(|c| arg.conclusion == c))
      .filter(|arg| {
        options
          .conclusion_contains_all
          .iter()
          .all(|term| arg.conclusion.contains(term.as_str()))
      })
      .skip(options.offset)
      .take(count)
      .cloned()
      .collect();

    tracing::debug!(results = found.len(), "fetched arguments");
    Ok(found)
  }
}
