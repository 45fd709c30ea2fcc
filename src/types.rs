use std::fmt;

/// Node identifier, assigned by the kernel's id generator.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NodeId(pub u64);

/// Relationship identifier, assigned by the kernel's id generator.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct RelId(pub u64);

/// Label token identifier.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct LabelId(pub u32);

/// Property-key token identifier.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct PropId(pub u32);

/// Relationship-type token identifier.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TypeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for RelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Direction of a relationship relative to a node.
///
/// `Both` is the slot used for self-loops, where start and end coincide.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    /// Outgoing relationships from a node.
    Outgoing,
    /// Incoming relationships to a node.
    Incoming,
    /// Both incoming and outgoing; used for self-loops.
    Both,
}

impl Direction {
    /// Returns true if this direction includes outgoing relationships.
    pub fn includes_out(self) -> bool {
        matches!(self, Direction::Outgoing | Direction::Both)
    }

    /// Returns true if this direction includes incoming relationships.
    pub fn includes_in(self) -> bool {
        matches!(self, Direction::Incoming | Direction::Both)
    }
}
