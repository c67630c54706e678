//! Shared window behavior: visibility, persisted placement and the
//! per-frame highlight transaction.

use partwizard_core::highlight::HighlightTracker;
use partwizard_core::vessel::{EditorHost, Vessel};

use crate::error::EditorResult;
use crate::settings::{SettingsStore, WindowRect};

/// Size of the area windows are placed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Screen {
    pub width: f32,
    pub height: f32,
}

impl Screen {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Everything a window may touch while rendering one frame.
pub struct FrameContext<'a> {
    pub vessel: &'a mut Vessel,
    pub host: &'a mut dyn EditorHost,
    pub settings: &'a mut SettingsStore,
    pub screen: Screen,
}

/// What a window produced this frame.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowContent<T> {
    Hidden,
    /// The window failed earlier and only shows an error notice.
    Error(String),
    Body(T),
}

impl<T> WindowContent<T> {
    pub fn body(&self) -> Option<&T> {
        match self {
            Self::Body(body) => Some(body),
            _ => None,
        }
    }

    pub fn is_hidden(&self) -> bool {
        matches!(self, Self::Hidden)
    }
}

/// Unlike `f32::clamp`, crossed bounds are allowed and the lower one is checked first.
fn clamp(value: f32, min: f32, max: f32) -> f32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Visibility, placement and error state of one window.
#[derive(Debug, Clone)]
pub struct WindowState {
    title: String,
    settings_key: &'static str,
    rect: WindowRect,
    minimum: WindowRect,
    visible: bool,
    mouse_over: bool,
    render_error: bool,
}

impl WindowState {
    /// `minimum` holds the smallest allowed position and size.
    pub fn new(
        title: impl Into<String>,
        settings_key: &'static str,
        default_rect: WindowRect,
        minimum: WindowRect,
    ) -> Self {
        Self {
            title: title.into(),
            settings_key,
            rect: default_rect,
            minimum,
            visible: false,
            mouse_over: false,
            render_error: false,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn settings_key(&self) -> &'static str {
        self.settings_key
    }

    pub fn rect(&self) -> WindowRect {
        self.rect
    }

    /// Moves or resizes the window, e.g. after the user dragged it.
    pub fn set_rect(&mut self, rect: WindowRect) {
        self.rect = rect;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_mouse_over(&self) -> bool {
        self.mouse_over
    }

    pub fn set_mouse_over(&mut self, mouse_over: bool) {
        self.mouse_over = mouse_over;
    }

    pub fn has_render_error(&self) -> bool {
        self.render_error
    }

    /// Restores the saved placement, keeps it on screen and shows the window.
    pub fn show(&mut self, settings: &SettingsStore, screen: Screen) -> EditorResult {
        let saved = settings.window_rect(self.settings_key, self.rect)?;
        let min = self.minimum;
        let mut rect = saved;
        rect.x = clamp(rect.x, min.x, screen.width - rect.width);
        rect.y = clamp(rect.y, min.y, screen.height - rect.height);
        rect.width = clamp(rect.width, min.width, screen.width - rect.x);
        rect.height = clamp(rect.height, min.height, screen.height - rect.y);
        self.rect = rect;
        self.visible = true;
        log::debug!(
            "Showing {} at ({}, {}) {}x{}",
            self.settings_key,
            rect.x as i32,
            rect.y as i32,
            rect.width as i32,
            rect.height as i32
        );
        Ok(())
    }

    /// Hides the window and remembers its placement.
    pub fn hide(&mut self, settings: &mut SettingsStore) -> EditorResult {
        self.visible = false;
        self.mouse_over = false;
        settings.set_window_rect(self.settings_key, self.rect)?;
        Ok(())
    }
}

/// Runs one frame of a window inside a highlight transaction.
///
/// The transaction is committed only when `body` succeeded and the window is
/// still visible and under the pointer; otherwise every highlight it holds is
/// restored. A failing body also latches the window's error state, so later
/// frames show the error notice instead of rendering again.
pub fn run_frame<T>(
    window: &mut WindowState,
    tracker: &mut HighlightTracker,
    ctx: &mut FrameContext<'_>,
    body: impl FnOnce(&mut WindowState, &mut HighlightTracker, &mut FrameContext<'_>) -> EditorResult<T>,
) -> EditorResult<T> {
    tracker.begin_tracking()?;

    let result = body(window, tracker, ctx);

    if result.is_ok() && window.visible && window.mouse_over {
        tracker.end_tracking(ctx.vessel)?;
    } else {
        tracker.cancel_tracking(ctx.vessel)?;
    }

    if let Err(e) = &result {
        log::error!("{} failed to render: {e}", window.settings_key);
        window.render_error = true;
    }
    result
}
