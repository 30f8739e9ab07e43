use std::collections::BTreeMap;

use dispatchdesk_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::Capability;

/// Capability map carried by a role.
///
/// A capability missing from the map is not granted. Maps round-trip through
/// storage unchanged, so a map persisted with only some keys stays that way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(BTreeMap<Capability, bool>);

impl PermissionSet {
    /// Returns a map with no entries, granting nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Returns a map granting every known capability.
    #[must_use]
    pub fn all_granted() -> Self {
        Self::from_granted(Capability::all().iter().copied())
    }

    /// Returns the default map for newly created custom roles.
    ///
    /// Dashboard, calendar and ticket pages are visible and own tickets are
    /// editable; every other capability is explicitly off.
    #[must_use]
    pub fn baseline() -> Self {
        Self::from_granted([
            Capability::ViewDashboard,
            Capability::ViewCalendar,
            Capability::ViewTickets,
            Capability::EditOwnTickets,
        ])
    }

    /// Builds a complete map where the listed capabilities are on and all
    /// others are off.
    #[must_use]
    pub fn from_granted(granted: impl IntoIterator<Item = Capability>) -> Self {
        let mut entries = Capability::all()
            .iter()
            .map(|capability| (*capability, false))
            .collect::<BTreeMap<_, _>>();
        for capability in granted {
            entries.insert(capability, true);
        }

        Self(entries)
    }

    /// Parses a transport map keyed by capability storage values.
    pub fn from_transport(values: &BTreeMap<String, bool>) -> AppResult<Self> {
        values
            .iter()
            .map(|(key, granted)| {
                Capability::from_transport(key.as_str()).map(|capability| (capability, *granted))
            })
            .collect::<Result<BTreeMap<_, _>, AppError>>()
            .map(Self)
    }

    /// Returns a transport map keyed by capability storage values.
    #[must_use]
    pub fn to_transport(&self) -> BTreeMap<String, bool> {
        self.0
            .iter()
            .map(|(capability, granted)| (capability.as_str().to_owned(), *granted))
            .collect()
    }

    /// Returns whether the capability is explicitly granted.
    #[must_use]
    pub fn is_granted(&self, capability: Capability) -> bool {
        self.0.get(&capability).copied().unwrap_or(false)
    }

    /// Sets one capability flag.
    pub fn set(&mut self, capability: Capability, granted: bool) {
        self.0.insert(capability, granted);
    }

    /// Returns the map with one capability flag changed.
    #[must_use]
    pub fn with(mut self, capability: Capability, granted: bool) -> Self {
        self.set(capability, granted);
        self
    }

    /// Iterates granted capabilities in vocabulary order.
    pub fn granted(&self) -> impl Iterator<Item = Capability> + '_ {
        self.0
            .iter()
            .filter_map(|(capability, granted)| granted.then_some(*capability))
    }

    /// Iterates every stored entry.
    pub fn iter(&self) -> impl Iterator<Item = (Capability, bool)> + '_ {
        self.0
            .iter()
            .map(|(capability, granted)| (*capability, *granted))
    }

    /// Returns the number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
