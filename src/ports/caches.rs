/// Durable, named resource caches. One generation is current at any time;
/// the platform serializes cache calls per origin, so implementations need
/// no locking of their own.
pub trait CacheStore: Clone + Send + Sync + 'static {
    type Error: std::fmt::Display + Send + Sync + 'static;
    type PopulateFut<'a>: Future<Output = Result<(), Self::Error>> + Send + 'a
    where
        Self: 'a;
    type NamesFut<'a>: Future<Output = Result<Vec<String>, Self::Error>> + Send + 'a
    where
        Self: 'a;
    type DeleteFut<'a>: Future<Output = Result<bool, Self::Error>> + Send + 'a
    where
        Self: 'a;

    /// Open (creating if absent) the named cache and fill it with the
    /// given resource paths.
    fn populate<'a>(&'a self, name: &'a str, urls: &'a [String]) -> Self::PopulateFut<'a>;
    /// All existing cache names, current and stale alike.
    fn names<'a>(&'a self) -> Self::NamesFut<'a>;
    /// Delete one cache. True when it existed.
    fn delete<'a>(&'a self, name: &'a str) -> Self::DeleteFut<'a>;
}
