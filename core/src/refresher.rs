//! Sale-state refresh keyed on (signer, candy machine, connection).
//!
//! The cached [`SaleState`] is a derivation of those three inputs. Calling
//! [`SaleStateRefresher::sync`] with the same inputs again is a no-op; new
//! inputs start a fetch tagged with a fresh generation, and a fetch that
//! completes after the inputs moved on is discarded. Fetch failures are
//! logged and never surfaced.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::{RefreshError, RefreshResult};
use crate::models::{Connection, PublicKey, SaleState, Signer};
use crate::services::ChainStateReader;

/// The inputs a sale state is derived from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RefreshKey {
    pub signer: Signer,
    pub candy_machine_id: PublicKey,
    pub connection: Connection,
}

impl RefreshKey {
    /// Build a key once every input is available.
    pub fn from_inputs(
        signer: Option<Signer>,
        candy_machine_id: Option<PublicKey>,
        connection: Option<Connection>,
    ) -> RefreshResult<Self> {
        Ok(Self {
            signer: signer.ok_or(RefreshError::MissingInput("signer"))?,
            candy_machine_id: candy_machine_id.ok_or(RefreshError::MissingInput("candy machine id"))?,
            connection: connection.ok_or(RefreshError::MissingInput("connection"))?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A new snapshot replaced the cached one.
    Applied(SaleState),
    /// Same inputs as last time; nothing fetched.
    Unchanged,
    /// Inputs incomplete; nothing fetched, cached snapshot kept.
    Incomplete(&'static str),
    /// Inputs changed while fetching; result dropped.
    Stale,
    /// Fetch failed; cached snapshot kept.
    Failed,
}

pub struct SaleStateRefresher {
    reader: Rc<dyn ChainStateReader>,
    key: RefCell<Option<RefreshKey>>,
    generation: Cell<u64>,
    state: RefCell<Option<SaleState>>,
}

impl SaleStateRefresher {
    pub fn new(reader: Rc<dyn ChainStateReader>) -> Self {
        Self {
            reader,
            key: RefCell::new(None),
            generation: Cell::new(0),
            state: RefCell::new(None),
        }
    }

    /// Latest applied snapshot.
    pub fn current(&self) -> Option<SaleState> {
        self.state.borrow().clone()
    }

    /// Re-derive the sale state if the inputs changed identity.
    pub async fn sync(&self, inputs: RefreshResult<RefreshKey>) -> RefreshOutcome {
        let key = match inputs {
            Ok(key) => key,
            Err(RefreshError::MissingInput(what)) => {
                if self.key.borrow_mut().take().is_some() {
                    self.bump();
                }
                return RefreshOutcome::Incomplete(what);
            }
            Err(e) => {
                log::warn!("{}", e);
                return RefreshOutcome::Failed;
            }
        };

        if self.key.borrow().as_ref() == Some(&key) {
            return RefreshOutcome::Unchanged;
        }
        *self.key.borrow_mut() = Some(key.clone());
        self.fetch(key).await
    }

    /// Fetch again for the current inputs, e.g. after a mint settled.
    pub async fn refresh(&self) -> RefreshOutcome {
        let key = self.key.borrow().clone();
        match key {
            Some(key) => self.fetch(key).await,
            None => RefreshOutcome::Incomplete("inputs"),
        }
    }

    fn bump(&self) -> u64 {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        generation
    }

    async fn fetch(&self, key: RefreshKey) -> RefreshOutcome {
        let generation = self.bump();
        let result = self
            .reader
            .fetch(&key.signer, &key.candy_machine_id, &key.connection)
            .await;

        if self.generation.get() != generation {
            log::debug!("Dropping stale sale state for {}", key.candy_machine_id);
            return RefreshOutcome::Stale;
        }

        match result {
            Ok(state) => {
                *self.state.borrow_mut() = Some(state.clone());
                RefreshOutcome::Applied(state)
            }
            Err(e) => {
                log::warn!("There was a problem fetching Candy Machine state!");
                log::warn!("{}", e);
                RefreshOutcome::Failed
            }
        }
    }
}
