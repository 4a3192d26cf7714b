//! In-memory roster with explicit synchronization state.
//!
//! Characters are kept in insertion order. Each entry also carries a
//! session-local [`CharacterId`] so editors can follow a character even when
//! entries before it are removed. Ids never leave the process: the wire shape
//! of a roster is a plain array of [`Character`] records.

use derive_more::Display;
use serde_json::Value;
use uuid::Uuid;

use crate::character::{Character, Delta};
use crate::error::{GatewayError, StoreError};
use crate::gateway::RosterGateway;
use crate::normalize::normalize_all;
use crate::ruleset::Ruleset;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub struct CharacterId(Uuid);

impl CharacterId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CharacterId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Display)]
pub enum SyncStatus {
    #[default]
    #[display("idle")]
    Idle,
    #[display("loading")]
    Loading,
    #[display("saving")]
    Saving,
    #[display("error: {_0}")]
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub id: CharacterId,
    pub character: Character,
}

impl RosterEntry {
    fn new(character: Character) -> Self {
        Self {
            id: CharacterId::new(),
            character,
        }
    }
}

/// Identifies one load request. Results carrying an outdated ticket are
/// dropped so a slow response never overwrites a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug, Default)]
pub struct Store {
    ruleset: Ruleset,
    entries: Vec<RosterEntry>,
    status: SyncStatus,
    load_generation: u64,
    loading: Option<LoadTicket>,
    pending_saves: usize,
}

impl Store {
    pub fn new(ruleset: Ruleset) -> Self {
        Self {
            ruleset,
            ..Self::default()
        }
    }

    pub fn ruleset(&self) -> &Ruleset {
        &self.ruleset
    }

    pub fn status(&self) -> &SyncStatus {
        &self.status
    }

    pub fn is_busy(&self) -> bool {
        self.loading.is_some() || self.pending_saves > 0
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    pub fn characters(&self) -> impl Iterator<Item = &Character> {
        self.entries.iter().map(|entry| &entry.character)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| &entry.character)
    }

    pub fn get_at(&self, index: usize) -> Option<&RosterEntry> {
        self.entries.get(index)
    }

    pub fn position(&self, id: CharacterId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    /// Appends a fresh default character and returns its id.
    pub fn add(&mut self) -> CharacterId {
        let entry = RosterEntry::new(Character::new(&self.ruleset));
        let id = entry.id;
        self.entries.push(entry);
        log::debug!("Added character {id} at index {}", self.entries.len() - 1);
        id
    }

    /// Replaces the character at `index` wholesale, keeping its id.
    pub fn update_at(&mut self, index: usize, character: Character) -> Result<(), StoreError> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(StoreError::IndexOutOfRange { index, len })?;
        entry.character = character;
        Ok(())
    }

    pub fn update(&mut self, id: CharacterId, character: Character) -> Result<(), StoreError> {
        let index = self.position(id).ok_or(StoreError::UnknownCharacter(id))?;
        self.update_at(index, character)
    }

    pub fn remove(&mut self, id: CharacterId) -> Result<Character, StoreError> {
        let index = self.position(id).ok_or(StoreError::UnknownCharacter(id))?;
        log::debug!("Removed character {id} from index {index}");
        Ok(self.entries.remove(index).character)
    }

    /// Applies one attribute step to a stored character.
    ///
    /// `Ok(false)` means the point-allocation rule rejected the step and the
    /// roster is unchanged.
    pub fn modify_attribute(
        &mut self,
        id: CharacterId,
        attribute: &str,
        delta: Delta,
    ) -> Result<bool, StoreError> {
        let character = self.get(id).ok_or(StoreError::UnknownCharacter(id))?;
        match character.modify_attribute(&self.ruleset, attribute, delta) {
            Some(updated) => {
                self.update(id, updated)?;
                Ok(true)
            }
            None => {
                log::debug!("Rejected {delta:?} on {attribute} for {id}");
                Ok(false)
            }
        }
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.load_generation += 1;
        let ticket = LoadTicket(self.load_generation);
        self.loading = Some(ticket);
        self.status = SyncStatus::Loading;
        ticket
    }

    /// Replaces the roster with the fetched records, or with nothing when the
    /// fetch failed. Stale tickets are ignored.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        fetched: Result<Vec<Value>, GatewayError>,
    ) -> Result<(), GatewayError> {
        if self.loading != Some(ticket) {
            log::debug!("Discarding stale load result {ticket:?}");
            return Ok(());
        }
        self.loading = None;
        match fetched {
            Ok(records) => {
                self.replace(normalize_all(&records, &self.ruleset));
                log::info!("Loaded {} characters", self.entries.len());
                self.refresh_status();
                Ok(())
            }
            Err(e) => {
                self.entries.clear();
                log::error!("Failed to load roster: {e}");
                self.status = SyncStatus::Error(format!("load failed: {e}"));
                Err(e)
            }
        }
    }

    /// Marks a save as in flight and returns the roster snapshot to send.
    pub fn begin_save(&mut self) -> Vec<Character> {
        self.pending_saves += 1;
        self.status = SyncStatus::Saving;
        self.characters().cloned().collect()
    }

    pub fn finish_save(&mut self, result: Result<(), GatewayError>) -> Result<(), GatewayError> {
        self.pending_saves = self.pending_saves.saturating_sub(1);
        match result {
            Ok(()) => {
                log::info!("Saved roster");
                self.refresh_status();
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to save roster: {e}");
                self.status = SyncStatus::Error(format!("save failed: {e}"));
                Err(e)
            }
        }
    }

    /// Fetches the remote roster and replaces the local one with it.
    pub async fn load<G: RosterGateway>(&mut self, gateway: &G) -> Result<(), GatewayError> {
        let ticket = self.begin_load();
        let fetched = gateway.fetch().await;
        self.finish_load(ticket, fetched)
    }

    /// Pushes the whole roster. The result may be ignored by the caller; the
    /// outcome is also reflected in [`Store::status`].
    pub async fn save<G: RosterGateway>(&mut self, gateway: &G) -> Result<(), GatewayError> {
        let snapshot = self.begin_save();
        let result = gateway.push(&snapshot).await;
        self.finish_save(result)
    }

    fn replace(&mut self, characters: Vec<Character>) {
        self.entries = characters.into_iter().map(RosterEntry::new).collect();
    }

    fn refresh_status(&mut self) {
        self.status = if self.loading.is_some() {
            SyncStatus::Loading
        } else if self.pending_saves > 0 {
            SyncStatus::Saving
        } else {
            SyncStatus::Idle
        };
    }
}
