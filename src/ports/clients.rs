/// One open window/tab under this worker's control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRef {
    pub id: String,
    pub url: String,
}

/// The worker-context host surface: lifecycle directives and control over
/// open windows.
pub trait ClientHost: Clone + Send + Sync + 'static {
    type Error: std::fmt::Display + Send + Sync + 'static;
    type ControlFut<'a>: Future<Output = Result<(), Self::Error>> + Send + 'a
    where
        Self: 'a;
    type WindowsFut<'a>: Future<Output = Result<Vec<WindowRef>, Self::Error>> + Send + 'a
    where
        Self: 'a;
    type OpenFut<'a>: Future<Output = Result<WindowRef, Self::Error>> + Send + 'a
    where
        Self: 'a;

    /// Ask the platform to activate this worker version immediately
    /// instead of waiting for all tabs to close.
    fn skip_waiting<'a>(&'a self) -> Self::ControlFut<'a>;
    /// Take control of already-open windows without requiring a reload.
    fn claim<'a>(&'a self) -> Self::ControlFut<'a>;
    /// Enumerate open windows under this worker's control.
    fn windows<'a>(&'a self) -> Self::WindowsFut<'a>;
    /// Bring an existing window to the foreground.
    fn focus<'a>(&'a self, window: &'a WindowRef) -> Self::ControlFut<'a>;
    /// Open a new window at the given absolute URL and focus it.
    fn open<'a>(&'a self, url: &'a str) -> Self::OpenFut<'a>;
}
