/// Process-wide persistent string store.
///
/// Writes are last-writer-wins; callers serialize them.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str);

    fn remove(&self, key: &str);
}
