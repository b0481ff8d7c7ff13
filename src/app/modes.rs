//! Focus and deferred-work state types.
//!
//! Keyboard input is interpreted according to the focused area:
//! - **Rail**: `j`/`k` walk the section buttons, `Enter` opens one
//! - **Context**: `j`/`k` walk the navigable rows, `Enter` activates or expands
//! - **Search**: printable keys edit the query
//!
//! A [`FrameTask`] is work that must wait until the next frame has been drawn,
//! such as focusing the search input right after the rail expands.

/// Area of the plugin receiving keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The icon rail.
    #[default]
    Rail,
    /// Rows of the context rail.
    Context,
    /// The context rail search input.
    Search,
}

/// Work deferred to the next frame tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameTask {
    /// Move focus into the search input without scrolling the context body.
    FocusSearch,
}
