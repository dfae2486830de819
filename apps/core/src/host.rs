use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Serialize;
use thiserror::Error;

use crate::model::Project;
use crate::projects::{self, ProjectError};

#[derive(Debug, Error)]
pub enum HostError {
    #[error("nothing to open")]
    EmptyTarget,
    #[error("failed to open {target}: {source}")]
    Open {
        target: String,
        source: std::io::Error,
    },
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
    #[error("failed to launch terminal: {0}")]
    Terminal(std::io::Error),
    #[error(transparent)]
    Projects(#[from] ProjectError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A side effect the core asks the host window to perform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "effect", content = "value", rename_all = "snake_case")]
pub enum Effect {
    Resize(u32),
    Hide,
    OpenExternal(String),
    OpenInEditor(String),
    OpenTerminal,
    WriteClipboard(String),
}

pub type FocusCallback = Box<dyn FnMut() + Send>;

/// Window and OS capabilities the launcher core depends on.
pub trait HostWindow {
    fn resize(&mut self, height: u32);
    fn hide(&mut self);
    fn begin_drag(&mut self, origin: Point);
    fn drag_to(&mut self, point: Point);
    fn end_drag(&mut self);
    fn open_external(&mut self, url: &str) -> Result<(), HostError>;
    fn write_clipboard_text(&mut self, text: &str) -> Result<(), HostError>;
    fn select_directory(&mut self) -> Option<PathBuf>;
    fn list_subdirectories(&self, path: &Path) -> Result<Vec<Project>, HostError>;
    fn open_in_editor(&mut self, path: &str) -> Result<(), HostError>;
    fn open_system_terminal(&mut self) -> Result<(), HostError>;
    fn set_tray_mode(&mut self, enabled: bool);
    fn on_focus_requested(&mut self, callback: FocusCallback);
}

/// Runs `effects` in order. Failures are logged and never stop later effects.
pub fn apply_effects(host: &mut dyn HostWindow, effects: &[Effect]) {
    for effect in effects {
        let result = match effect {
            Effect::Resize(height) => {
                host.resize(*height);
                Ok(())
            }
            Effect::Hide => {
                host.hide();
                Ok(())
            }
            Effect::OpenExternal(url) => host.open_external(url),
            Effect::OpenInEditor(path) => host.open_in_editor(path),
            Effect::OpenTerminal => host.open_system_terminal(),
            Effect::WriteClipboard(text) => host.write_clipboard_text(text),
        };
        if let Err(error) = result {
            tracing::warn!(?effect, %error, "host effect failed");
        }
    }
}

/// Host backed by the desktop: browser, clipboard, editor and terminal are
/// real; window geometry is tracked in memory.
pub struct SystemHost {
    height: u32,
    visible: bool,
    position: Point,
    drag_origin: Option<(Point, Point)>,
    tray_mode: bool,
    max_height: u32,
    editor_app: Option<String>,
    pending_directory: Option<PathBuf>,
    focus_callbacks: Vec<FocusCallback>,
}

impl SystemHost {
    pub fn new(max_height: u32) -> Self {
        Self {
            height: crate::layout::BASE_HEIGHT,
            visible: false,
            position: Point::default(),
            drag_origin: None,
            tray_mode: false,
            max_height,
            editor_app: Some("Cursor".to_string()),
            pending_directory: None,
            focus_callbacks: Vec::new(),
        }
    }

    /// Directory returned by the next `select_directory` call.
    pub fn queue_directory(&mut self, path: PathBuf) {
        self.pending_directory = Some(path);
    }

    pub fn show_and_focus(&mut self) {
        self.visible = true;
        for callback in &mut self.focus_callbacks {
            callback();
        }
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn tray_mode(&self) -> bool {
        self.tray_mode
    }
}

impl HostWindow for SystemHost {
    fn resize(&mut self, height: u32) {
        self.height = height.min(self.max_height);
    }

    fn hide(&mut self) {
        self.visible = false;
    }

    fn begin_drag(&mut self, origin: Point) {
        self.drag_origin = Some((origin, self.position));
    }

    fn drag_to(&mut self, point: Point) {
        if let Some((origin, window)) = self.drag_origin {
            self.position = Point::new(
                window.x + (point.x - origin.x),
                window.y + (point.y - origin.y),
            );
        }
    }

    fn end_drag(&mut self) {
        self.drag_origin = None;
    }

    fn open_external(&mut self, url: &str) -> Result<(), HostError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(HostError::EmptyTarget);
        }
        open::that(url).map_err(|source| HostError::Open {
            target: url.to_string(),
            source,
        })
    }

    fn write_clipboard_text(&mut self, text: &str) -> Result<(), HostError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| HostError::Clipboard(e.to_string()))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| HostError::Clipboard(e.to_string()))
    }

    fn select_directory(&mut self) -> Option<PathBuf> {
        self.pending_directory.take()
    }

    fn list_subdirectories(&self, path: &Path) -> Result<Vec<Project>, HostError> {
        Ok(projects::list_subdirectories(path)?)
    }

    fn open_in_editor(&mut self, path: &str) -> Result<(), HostError> {
        let path = path.trim();
        if path.is_empty() {
            return Err(HostError::EmptyTarget);
        }
        let opened = match (&self.editor_app, cfg!(target_os = "macos")) {
            (Some(app), true) => open::with(path, app),
            _ => open::that(path),
        };
        opened.map_err(|source| HostError::Open {
            target: path.to_string(),
            source,
        })
    }

    fn open_system_terminal(&mut self) -> Result<(), HostError> {
        terminal_command()
            .spawn()
            .map(|_| ())
            .map_err(HostError::Terminal)
    }

    fn set_tray_mode(&mut self, enabled: bool) {
        self.tray_mode = enabled;
    }

    fn on_focus_requested(&mut self, callback: FocusCallback) {
        self.focus_callbacks.push(callback);
    }
}

fn terminal_command() -> Command {
    let home = std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir);

    if cfg!(target_os = "macos") {
        let mut command = Command::new("open");
        command.arg("-a").arg("Terminal").arg(&home);
        command
    } else if cfg!(target_os = "windows") {
        let comspec = std::env::var("COMSPEC")
            .unwrap_or_else(|_| "C:\\Windows\\System32\\cmd.exe".to_string());
        let mut command = Command::new("cmd");
        command.arg("/C").arg("start").arg("").arg(comspec);
        command
    } else {
        let terminal =
            std::env::var("TERMINAL").unwrap_or_else(|_| "x-terminal-emulator".to_string());
        let mut command = Command::new(terminal);
        command.current_dir(&home);
        command
    }
}
