// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session-to-display-name bindings.

use dashmap::DashMap;
use tracing::debug;

use parlor_core::error::ValidationError;
use parlor_core::types::{Identity, SessionId};

/// Maps each active session to the display name it joined under.
///
/// Entries are independent across sessions: distinct-key writes never
/// contend, and a same-key rebind (re-join) simply overwrites -- there is no
/// logout command, so last call wins by design.
pub struct IdentityRegistry {
    names: DashMap<SessionId, String>,
}

impl IdentityRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            names: DashMap::new(),
        }
    }

    /// Bind `session` to `candidate_name` for the rest of its connection.
    ///
    /// The name is trimmed before validation and storage; an empty or
    /// whitespace-only candidate fails with [`ValidationError::BlankName`]
    /// and leaves any existing binding untouched.
    pub fn bind(
        &self,
        session: &SessionId,
        candidate_name: &str,
    ) -> Result<Identity, ValidationError> {
        let name = candidate_name.trim();
        if name.is_empty() {
            return Err(ValidationError::BlankName);
        }
        self.names.insert(session.clone(), name.to_string());
        debug!(session = %session, name, "display name bound");
        Ok(Identity {
            session_id: session.clone(),
            display_name: name.to_string(),
        })
    }

    /// The display name `session` joined under, if it ever joined.
    pub fn display_name_for(&self, session: &SessionId) -> Option<String> {
        self.names.get(session).map(|name| name.value().clone())
    }

    /// Number of sessions with a bound name.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no session has joined yet.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for IdentityRegistry {
    fn default() -> Self {
        Self::new()
    }
}
