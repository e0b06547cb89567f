use axum::Router;

/// A service module that contributes HTTP routes.
///
/// Each business module (auth, board) implements this trait to register
/// its API endpoints. The server binary collects all modules and nests
/// their routes under the common `/api` prefix.
pub trait Module: Send + Sync {
    /// Module name, used for logging.
    fn name(&self) -> &str;

    /// Return the module's routes. Paths are relative to `/api`.
    fn routes(&self) -> Router;
}
