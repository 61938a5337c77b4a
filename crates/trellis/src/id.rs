use slotmap::new_key_type;

new_key_type! {
    /// Identifier for a node in the tree. Ids are generational: once a node is
    /// purged its id never resolves again, even if the slot is reused.
    pub struct NodeId;
}
