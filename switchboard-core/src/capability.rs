//! Capability derivation from session scopes.
//!
//! A capability is a derived boolean saying whether the current user may
//! query a particular related entity's fields. The enumeration is fixed: one
//! capability per sensitive related entity. Capability sets are derived on
//! demand and never persisted.

use crate::scope::Scope;
use crate::session::SessionUser;
use bitflags::bitflags;

/// A single named capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// May read user accounts and user sub-fields of other entities.
    Users,
    /// May read upstream provider channels.
    Channels,
    /// May read gateway API keys.
    ApiKeys,
}

impl Capability {
    /// The scope string that grants this capability to non-owners.
    pub fn granting_scope(&self) -> &'static str {
        match self {
            Capability::Users => Scope::READ_USERS,
            Capability::Channels => Scope::READ_CHANNELS,
            Capability::ApiKeys => Scope::READ_API_KEYS,
        }
    }

    pub fn all() -> &'static [Capability] {
        &[Capability::Users, Capability::Channels, Capability::ApiKeys]
    }

    fn flag(&self) -> CapabilitySet {
        match self {
            Capability::Users => CapabilitySet::USERS,
            Capability::Channels => CapabilitySet::CHANNELS,
            Capability::ApiKeys => CapabilitySet::API_KEYS,
        }
    }
}

bitflags! {
    /// The full derived capability set for a session.
    ///
    /// `Copy + Eq + Hash`, so it can participate directly in cache keys.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CapabilitySet: u8 {
        const USERS = 1;
        const CHANNELS = 1 << 1;
        const API_KEYS = 1 << 2;
    }
}

impl CapabilitySet {
    /// Derive the capability set from the session user.
    ///
    /// `None` (pre-authentication) yields no capabilities. The owner flag and
    /// the wildcard scope each short-circuit to every capability; otherwise a
    /// capability holds iff its granting scope is present. Pure on
    /// `(scopes, is_owner)`.
    pub fn resolve(user: Option<&SessionUser>) -> Self {
        let Some(user) = user else {
            return CapabilitySet::empty();
        };
        if user.is_owner || user.scopes.iter().any(Scope::is_wildcard) {
            return CapabilitySet::all();
        }
        let mut set = CapabilitySet::empty();
        for capability in Capability::all() {
            if user
                .scopes
                .iter()
                .any(|scope| scope.as_str() == capability.granting_scope())
            {
                set |= capability.flag();
            }
        }
        set
    }

    /// Whether this set grants the given capability.
    pub fn allows(&self, capability: Capability) -> bool {
        self.contains(capability.flag())
    }
}
