/// The side of a node on which a child hangs.
///
/// Rebalancing logic is written once in terms of a `Branch` and its inverse instead of being
/// duplicated for mirrored cases.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Branch {
    Left,
    Right,
}

impl Branch {
    /// Returns the opposite side.
    pub fn inverse(self) -> Branch {
        match self {
            Branch::Left => Branch::Right,
            Branch::Right => Branch::Left,
        }
    }
}
