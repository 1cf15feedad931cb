use std::collections::BTreeMap;
use std::fmt;

use crate::graph::TransportKind;

/// Ticket types. A ticket pays for one step along a connection.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TicketKind {
    Taxi,
    Bus,
    Underground,
    /// Usable on every kind of connection, including ferries.
    Black,
}

impl TicketKind {
    /// Returns true if this ticket pays for a connection of the given kind.
    pub const fn covers(self, transport: TransportKind) -> bool {
        matches!(
            (self, transport),
            (Self::Black, _)
                | (Self::Taxi, TransportKind::Taxi)
                | (Self::Bus, TransportKind::Bus)
                | (Self::Underground, TransportKind::Underground)
        )
    }

    /// The regular ticket for a transport kind. Ferries have none.
    pub const fn for_transport(transport: TransportKind) -> Option<Self> {
        match transport {
            TransportKind::Taxi => Some(Self::Taxi),
            TransportKind::Bus => Some(Self::Bus),
            TransportKind::Underground => Some(Self::Underground),
            TransportKind::Ferry => None,
        }
    }
}

/// Anything a player can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Item {
    Ticket(TicketKind),
    /// Lets Mr. X take two steps in one turn.
    DoubleMove,
}

impl Item {
    pub const fn ticket(kind: TicketKind) -> Self {
        Self::Ticket(kind)
    }

    pub const fn as_ticket(self) -> Option<TicketKind> {
        match self {
            Self::Ticket(kind) => Some(kind),
            Self::DoubleMove => None,
        }
    }
}

impl From<TicketKind> for Item {
    fn from(kind: TicketKind) -> Self {
        Self::Ticket(kind)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ticket(kind) => write!(f, "{kind} ticket"),
            Self::DoubleMove => f.write_str("double move card"),
        }
    }
}

/// Items held by one player, counted by type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemSet {
    counts: BTreeMap<Item, u32>,
}

impl ItemSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper adding `count` copies of `item`.
    #[must_use]
    pub fn with(mut self, item: impl Into<Item>, count: u32) -> Self {
        self.add_many(item.into(), count);
        self
    }

    pub fn count(&self, item: impl Into<Item>) -> u32 {
        self.counts.get(&item.into()).copied().unwrap_or(0)
    }

    pub fn contains(&self, item: impl Into<Item>) -> bool {
        self.count(item) > 0
    }

    pub fn add(&mut self, item: impl Into<Item>) {
        self.add_many(item.into(), 1);
    }

    pub fn add_many(&mut self, item: Item, count: u32) {
        if count > 0 {
            let held = self.counts.entry(item).or_insert(0);
            *held = held.saturating_add(count);
        }
    }

    /// Removes one copy of `item`. Returns false if none was held.
    pub fn remove(&mut self, item: impl Into<Item>) -> bool {
        let item = item.into();
        match self.counts.get_mut(&item) {
            Some(count) if *count > 1 => {
                *count -= 1;
                true
            }
            Some(_) => {
                self.counts.remove(&item);
                true
            }
            None => false,
        }
    }

    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Held items with their counts, zero counts omitted.
    pub fn iter(&self) -> impl Iterator<Item = (Item, u32)> + '_ {
        self.counts.iter().map(|(item, count)| (*item, *count))
    }

    /// Ticket kinds with at least one ticket held.
    pub fn tickets(&self) -> impl Iterator<Item = TicketKind> + '_ {
        self.counts.keys().filter_map(|item| item.as_ticket())
    }
}

impl fmt::Display for ItemSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (item, count) in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{count}x {item}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_ticket_covers_ferry() {
        assert!(TicketKind::Black.covers(TransportKind::Ferry));
        assert!(!TicketKind::Taxi.covers(TransportKind::Ferry));
        assert!(!TicketKind::Bus.covers(TransportKind::Underground));
        assert_eq!(TicketKind::for_transport(TransportKind::Ferry), None);
    }

    #[test]
    fn counts_by_type_and_drops_empty_entries() {
        let mut items = ItemSet::new()
            .with(TicketKind::Taxi, 2)
            .with(Item::DoubleMove, 1);

        assert!(items.remove(TicketKind::Taxi));
        assert_eq!(items.count(TicketKind::Taxi), 1);
        assert!(items.remove(Item::DoubleMove));
        assert!(!items.remove(Item::DoubleMove));
        assert_eq!(items.iter().collect::<Vec<_>>(), vec![(Item::Ticket(TicketKind::Taxi), 1)]);
        assert_eq!(items.total(), 1);
    }
}
