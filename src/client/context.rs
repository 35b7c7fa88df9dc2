//! The execution context a command binds to the engine.

/// Handle to the command currently driving the engine.
///
/// The engine treats the context as opaque: beyond the presence check that
/// gates every externally-initiated request, it only forwards diagnostic
/// lines to [`log`](CommandContext::log) when the command runs in debug mode.
/// Output formatting stays in the command layer.
pub trait CommandContext: Send + Sync {
    /// Writes a diagnostic line to the command's output.
    fn log(&self, message: &str);

    /// Returns `true` when the command was invoked with debug output enabled.
    fn debug_enabled(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Silent;

    impl CommandContext for Silent {
        fn log(&self, _message: &str) {}
    }

    #[test]
    fn test_debug_is_off_by_default() {
        assert!(!Silent.debug_enabled());
    }
}
