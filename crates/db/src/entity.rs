/// Store-assigned identity.
pub type Id = i64;

/// A record the store can persist.
///
/// The identity is absent until the first save; the store assigns it and the
/// services never invent one.
pub trait Entity: Clone + Send + Sync + 'static {
    fn id(&self) -> Option<Id>;

    fn assign_id(&mut self, id: Id);
}
