//! Codec configuration.

/// Deepest nesting `serde_json` will parse; it rejects the 128th level.
///
/// Limits above this could serialise documents that cannot be read back,
/// so [`Options::with_max_depth`] clamps to it.
pub const MAX_DEPTH: usize = 127;

pub const DEFAULT_MAX_DEPTH: usize = MAX_DEPTH;

/// Settings shared by the encode and decode walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Deepest container nesting accepted before failing with
    /// [`MediaJsonError::DepthLimit`](crate::MediaJsonError::DepthLimit).
    /// Counted as written on the wire, so a rational is one level.
    pub max_depth: usize,
    /// Emit indented JSON from the `dump*` entry points.
    pub pretty: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            pretty: false,
        }
    }
}

impl Options {
    /// Set the nesting limit, clamped to [`MAX_DEPTH`].
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.min(MAX_DEPTH);
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}
