//! The chat relay: user pool, announcements, and text fan-out.
//!
//! Every connected user is represented by the sending half of an unbounded
//! `mpsc` channel.  The infrastructure layer owns the receiving half and
//! drains it into the user's WebSocket.  This keeps the relay free of any
//! socket types, so it can be driven directly from tests.
//!
//! # Message flow
//!
//! ```text
//! join(tx)        → add:<id> to everyone else, #<id> to the new user
//! Text "hi"       → "User #<id>: hi" to everyone else
//! Command populate→ pop:[other ids] to the sender
//! announce_quit   → quit:<id> to everyone else
//! broadcast_close → close to everyone
//! ```
//!
//! Sends to a channel whose receiver is gone are ignored; the owning session
//! removes itself from the pool when it notices.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chat_core::{Command, Envelope, MsgType, ProtocolError, UserId};
use thiserror::Error;
use tokio::sync::{mpsc, watch, RwLock};
use tokio::time::timeout;
use tracing::{debug, info};

/// Outbound channel to a single connected user.
pub type UserTx = mpsc::UnboundedSender<Envelope>;

/// Errors produced while handling a user's inbound envelope.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The command content could not be parsed.
    #[error("bad command from user #{user}: {source}")]
    BadCommand {
        user: UserId,
        #[source]
        source: ProtocolError,
    },

    /// The user is not (or no longer) in the pool.
    #[error("user #{0} is not connected")]
    UnknownUser(UserId),
}

/// Shared state of the relay server.
///
/// Wrap in an `Arc` and hand a clone to every session task.
pub struct ChatRelay {
    next_id: AtomicU64,
    pool: RwLock<HashMap<UserId, UserTx>>,
    /// Pool size, republished under the pool's write lock on every change.
    occupancy: watch::Sender<usize>,
}

impl Default for ChatRelay {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatRelay {
    /// Creates an empty relay.  The first user to join gets id 1.
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            pool: RwLock::new(HashMap::new()),
            occupancy: watch::Sender::new(0),
        }
    }

    /// Registers a new user and returns its id.
    ///
    /// Every user already connected receives `add:<id>`.  The new user
    /// receives `#<id>` on `tx`.
    pub async fn join(&self, tx: UserTx) -> UserId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);

        // Announce before inserting so the newcomer does not hear about itself.
        self.broadcast(&Envelope::from_command(&Command::Joined(id)), None)
            .await;

        {
            let mut pool = self.pool.write().await;
            pool.insert(id, tx.clone());
            self.occupancy.send_replace(pool.len());
        }
        let _ = tx.send(Envelope::from_command(&Command::Welcome(id)));

        info!("user #{id} joined");
        id
    }

    /// Removes a user from the pool without announcing it.
    ///
    /// Returns `false` if the user was not in the pool.
    pub async fn leave(&self, id: UserId) -> bool {
        let removed = {
            let mut pool = self.pool.write().await;
            let removed = pool.remove(&id).is_some();
            self.occupancy.send_replace(pool.len());
            removed
        };
        if removed {
            info!("user #{id} left");
        }
        removed
    }

    /// Tells every other user that `id` disconnected.
    pub async fn announce_quit(&self, id: UserId) {
        self.broadcast(&Envelope::from_command(&Command::Left(id)), Some(id))
            .await;
    }

    /// Handles one envelope received from user `id`.
    ///
    /// # Errors
    ///
    /// - [`RelayError::BadCommand`] if a `Command` envelope has unparseable
    ///   content.
    /// - [`RelayError::UnknownUser`] if a `populate` reply cannot be
    ///   delivered because `id` is not in the pool.
    pub async fn handle_inbound(&self, id: UserId, envelope: &Envelope) -> Result<(), RelayError> {
        match envelope.msg_type {
            MsgType::Command => {
                let command = Command::parse(&envelope.content)
                    .map_err(|source| RelayError::BadCommand { user: id, source })?;
                match command {
                    Command::Populate => {
                        let others = self.population(id).await;
                        let reply = Envelope::from_command(&Command::Population(others));
                        self.send_to(id, reply).await
                    }
                    other => {
                        debug!("user #{id}: ignoring command {other}");
                        Ok(())
                    }
                }
            }
            MsgType::Text => {
                let line = Envelope::text(format!("User #{id}: {}", envelope.content));
                self.broadcast(&line, Some(id)).await;
                Ok(())
            }
        }
    }

    /// Returns the ids of every connected user except `id`, sorted ascending.
    pub async fn population(&self, id: UserId) -> Vec<UserId> {
        let pool = self.pool.read().await;
        let mut others: Vec<UserId> = pool.keys().copied().filter(|k| *k != id).collect();
        others.sort_unstable();
        others
    }

    /// Sends `close` to every connected user.
    pub async fn broadcast_close(&self) {
        info!("telling {} user(s) the server is closing", self.len().await);
        self.broadcast(&Envelope::from_command(&Command::Close), None)
            .await;
    }

    /// Number of connected users.
    pub async fn len(&self) -> usize {
        self.pool.read().await.len()
    }

    /// Returns `true` if nobody is connected.
    pub async fn is_empty(&self) -> bool {
        self.pool.read().await.is_empty()
    }

    /// Waits until the pool is empty or `grace` has elapsed.
    ///
    /// Returns `true` if the pool drained in time.
    pub async fn wait_until_empty(&self, grace: Duration) -> bool {
        let mut occupancy = self.occupancy.subscribe();
        // The sender lives in `self`, so `wait_for` can only end in `Ok`.
        let drained = matches!(
            timeout(grace, occupancy.wait_for(|users| *users == 0)).await,
            Ok(Ok(_))
        );
        drained
    }

    async fn send_to(&self, id: UserId, envelope: Envelope) -> Result<(), RelayError> {
        let pool = self.pool.read().await;
        let tx = pool.get(&id).ok_or(RelayError::UnknownUser(id))?;
        let _ = tx.send(envelope);
        Ok(())
    }

    async fn broadcast(&self, envelope: &Envelope, except: Option<UserId>) {
        let pool = self.pool.read().await;
        for (id, tx) in pool.iter() {
            if Some(*id) == except {
                continue;
            }
            let _ = tx.send(envelope.clone());
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
