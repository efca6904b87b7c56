use std::fmt;

/// Errors surfaced by the composition core.
///
/// Nothing here is caught internally: precondition failures and resource
/// resolution failures both propagate to the caller, which owns retry
/// policy (if any).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// Geometry or shader assembly was requested before the sprite's
    /// textures finished loading.
    TexturesNotReady {
        /// Key of the sprite whose textures are still pending.
        sprite: String,
    },
    /// The backend could not resolve a texture path.
    TextureLoad {
        /// Path that failed to resolve.
        path: String,
        /// Backend-supplied failure description.
        message: String,
    },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::TexturesNotReady { sprite } => {
                write!(f, "sprite '{sprite}': textures not loaded yet")
            }
            SceneError::TextureLoad { path, message } => {
                write!(f, "texture '{path}' failed to load: {message}")
            }
        }
    }
}

impl std::error::Error for SceneError {}
