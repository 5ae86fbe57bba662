use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::DesktopError;

pub const DESKTOP_LAYOUT_SCHEMA_VERSION: u32 = 1;
/// z-index every window is seeded with; the first focus allocates `INITIAL_Z_INDEX + 1`.
pub const INITIAL_Z_INDEX: u32 = 10;
pub const MENU_BAR_HEIGHT: i32 = 28;
pub const MIN_WINDOW_WIDTH: i32 = 400;
pub const MIN_WINDOW_HEIGHT: i32 = 300;
pub const DEFAULT_PASSWORD: &str = "admin";

pub const WALLPAPERS: [&str; 4] = [
    "https://images.unsplash.com/photo-1614850523296-d8c1af93d400?auto=format&fit=crop&w=2000&q=80",
    "https://images.unsplash.com/photo-1541450805268-4822a3a774ce?auto=format&fit=crop&w=2000&q=80",
    "https://images.unsplash.com/photo-1477346611705-65d1883cee1e?auto=format&fit=crop&w=2000&q=80",
    "https://images.unsplash.com/photo-1506744038136-46273834b3fb?auto=format&fit=crop&w=2000&q=80",
];

/// Application ids that own a window. The set is closed: every id always has a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppId {
    Finder,
    Safari,
    Notes,
    Terminal,
    Camera,
    Settings,
}

impl AppId {
    pub const ALL: [AppId; 6] = [
        Self::Finder,
        Self::Safari,
        Self::Notes,
        Self::Terminal,
        Self::Camera,
        Self::Settings,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::Finder => "Finder",
            Self::Safari => "Safari",
            Self::Notes => "Notes",
            Self::Terminal => "Terminal",
            Self::Camera => "Camera",
            Self::Settings => "Settings",
        }
    }

    /// Stable lowercase id used in scripts, persisted snapshots and logs.
    pub const fn canonical_id(self) -> &'static str {
        match self {
            Self::Finder => "finder",
            Self::Safari => "safari",
            Self::Notes => "notes",
            Self::Terminal => "terminal",
            Self::Camera => "camera",
            Self::Settings => "settings",
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Finder => 0,
            Self::Safari => 1,
            Self::Notes => 2,
            Self::Terminal => 3,
            Self::Camera => 4,
            Self::Settings => 5,
        }
    }

    /// Geometry the window is seeded with at session start.
    pub fn default_rect(self) -> WindowRect {
        let (x, y, w, h) = match self {
            Self::Finder => (250, 100, 800, 500),
            Self::Safari => (150, 50, 1000, 650),
            Self::Notes => (200, 150, 700, 450),
            Self::Terminal => (300, 200, 700, 450),
            Self::Camera => (400, 100, 640, 480),
            Self::Settings => (250, 80, 800, 550),
        };
        WindowRect { x, y, w, h }
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_id())
    }
}

impl FromStr for AppId {
    type Err = DesktopError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let needle = raw.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|app_id| app_id.canonical_id() == needle)
            .ok_or_else(|| DesktopError::UnknownApp(raw.trim().to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl WindowRect {
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..self
        }
    }

    pub fn clamped_min(self, min_w: i32, min_h: i32) -> Self {
        Self {
            w: self.w.max(min_w),
            h: self.h.max(min_h),
            ..self
        }
    }
}

/// Browser viewport the shell renders into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    /// Rectangle a maximized window occupies: everything below the menu bar.
    pub fn maximized_rect(self, menu_bar_height: i32) -> WindowRect {
        WindowRect {
            x: 0,
            y: menu_bar_height,
            w: self.width,
            h: self.height.saturating_sub(menu_bar_height).max(0),
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1440,
            height: 900,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub app_id: AppId,
    pub title: String,
    pub rect: WindowRect,
    pub z_index: u32,
    pub is_open: bool,
    pub minimized: bool,
    pub maximized: bool,
    /// Declared for grouped stage layouts; no policy reads it yet.
    pub stage_group: Option<String>,
}

impl WindowRecord {
    pub fn seeded(app_id: AppId) -> Self {
        Self {
            app_id,
            title: app_id.title().to_string(),
            rect: app_id.default_rect(),
            z_index: INITIAL_Z_INDEX,
            is_open: false,
            minimized: false,
            maximized: false,
            stage_group: None,
        }
    }

    /// Geometry the window is drawn at, honoring the maximized override.
    pub fn effective_rect(&self, viewport: Viewport, menu_bar_height: i32) -> WindowRect {
        if self.maximized {
            viewport.maximized_rect(menu_bar_height)
        } else {
            self.rect
        }
    }
}

/// Fixed-size table with exactly one record per [`AppId`].
///
/// Lookups index by the enum discriminant, so they cannot miss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRegistry {
    windows: [WindowRecord; 6],
}

impl WindowRegistry {
    pub fn get(&self, app_id: AppId) -> &WindowRecord {
        &self.windows[app_id.index()]
    }

    pub(crate) fn get_mut(&mut self, app_id: AppId) -> &mut WindowRecord {
        &mut self.windows[app_id.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &WindowRecord> {
        self.windows.iter()
    }

    /// Highest z-index currently held by any window.
    pub fn max_z_index(&self) -> u32 {
        self.windows
            .iter()
            .map(|w| w.z_index)
            .max()
            .unwrap_or(INITIAL_Z_INDEX)
    }
}

impl Default for WindowRegistry {
    fn default() -> Self {
        Self {
            windows: AppId::ALL.map(WindowRecord::seeded),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlayKind {
    /// Command palette / search overlay.
    Spotlight,
    /// Quick-settings panel.
    ControlCenter,
}

impl FromStr for OverlayKind {
    type Err = DesktopError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "spotlight" | "palette" => Ok(Self::Spotlight),
            "control-center" | "controlcenter" | "panel" => Ok(Self::ControlCenter),
            other => Err(DesktopError::InvalidCommand(format!(
                "unknown overlay `{other}`"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub avatar: String,
    pub wallpaper: String,
    pub theme: ThemeMode,
    pub accent_color: String,
}

impl UserProfile {
    pub fn admin() -> Self {
        Self {
            id: "1".to_string(),
            username: "Admin User".to_string(),
            avatar: "https://picsum.photos/id/64/200/200".to_string(),
            wallpaper: WALLPAPERS[0].to_string(),
            theme: ThemeMode::Dark,
            accent_color: "blue".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesktopState {
    pub windows: WindowRegistry,
    pub active_app: Option<AppId>,
    /// Last z-index handed out. Only ever grows, including across logout.
    pub z_counter: u32,
    pub overlays: crate::overlay::OverlayToggles,
    pub stage_mode: bool,
    pub theme: ThemeMode,
    pub user: Option<UserProfile>,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self {
            windows: WindowRegistry::default(),
            active_app: None,
            z_counter: INITIAL_Z_INDEX,
            overlays: crate::overlay::OverlayToggles::default(),
            stage_mode: false,
            theme: ThemeMode::default(),
            user: None,
        }
    }
}

impl DesktopState {
    pub fn window(&self, app_id: AppId) -> &WindowRecord {
        self.windows.get(app_id)
    }

    pub fn snapshot(&self) -> DesktopSnapshot {
        DesktopSnapshot {
            schema_version: DESKTOP_LAYOUT_SCHEMA_VERSION,
            windows: self.windows.iter().cloned().collect(),
            stage_mode: self.stage_mode,
            theme: self.theme,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesktopSnapshot {
    pub schema_version: u32,
    pub windows: Vec<WindowRecord>,
    pub stage_mode: bool,
    pub theme: ThemeMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub app_id: AppId,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
}

/// Resize from the bottom-right handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeSession {
    pub app_id: AppId,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub dragging: Option<DragSession>,
    pub resizing: Option<ResizeSession>,
}
