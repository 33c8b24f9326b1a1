//! Error types for the backdrop core.

use thiserror::Error;

/// Errors produced by animation operations.
#[derive(Debug, Error)]
pub enum AnimationError {
    /// Width or height was zero when creating a surface or animation.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// The surface handed to `tick` does not match the animation's dimensions.
    #[error("surface is ({got_w}, {got_h}) but the animation was sized ({want_w}, {want_h})")]
    DimensionMismatch {
        want_w: usize,
        want_h: usize,
        got_w: usize,
        got_h: usize,
    },

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A palette could not be constructed or looked up.
    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    /// An animation name was not recognized by the registry.
    #[error("unknown animation: {0}")]
    UnknownAnimation(String),

    /// An I/O failure while writing a snapshot.
    #[error("i/o error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dimensions_displays_readable_message() {
        let err = AnimationError::InvalidDimensions;
        let msg = format!("{err}");
        assert!(
            msg.contains("width") && msg.contains("height"),
            "expected message mentioning width and height, got: {msg}"
        );
    }

    #[test]
    fn dimension_mismatch_includes_all_dimensions() {
        let err = AnimationError::DimensionMismatch {
            want_w: 640,
            want_h: 360,
            got_w: 320,
            got_h: 180,
        };
        let msg = format!("{err}");
        assert!(msg.contains("640"), "missing want_w in: {msg}");
        assert!(msg.contains("360"), "missing want_h in: {msg}");
        assert!(msg.contains("320"), "missing got_w in: {msg}");
        assert!(msg.contains("180"), "missing got_h in: {msg}");
    }

    #[test]
    fn invalid_color_includes_message() {
        let err = AnimationError::InvalidColor("bad hex".into());
        let msg = format!("{err}");
        assert!(msg.contains("bad hex"), "missing message in: {msg}");
    }

    #[test]
    fn invalid_palette_includes_message() {
        let err = AnimationError::InvalidPalette("empty".into());
        let msg = format!("{err}");
        assert!(msg.contains("empty"), "missing message in: {msg}");
    }

    #[test]
    fn unknown_animation_includes_name() {
        let err = AnimationError::UnknownAnimation("lava-lamp".into());
        let msg = format!("{err}");
        assert!(msg.contains("lava-lamp"), "missing name in: {msg}");
    }

    #[test]
    fn io_error_includes_message() {
        let err = AnimationError::Io("disk full".into());
        let msg = format!("{err}");
        assert!(msg.contains("disk full"), "missing message in: {msg}");
    }

    #[test]
    fn animation_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AnimationError>();
    }

    #[test]
    fn animation_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<AnimationError>();
    }
}
