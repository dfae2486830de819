#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::thread::JoinHandle;

use quicklaunch_core::host::{FocusCallback, HostError, HostWindow, Point};
use quicklaunch_core::model::Project;
use quicklaunch_core::sync::{
    AddBookmarkRequest, BookmarkDto, LoginRequest, LoginResponse, SyncClient, SyncError,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    Resize(u32),
    Hide,
    OpenExternal(String),
    OpenInEditor(String),
    OpenTerminal,
    Clipboard(String),
    TrayMode(bool),
    DragTo(Point),
}

/// Host that records every call instead of touching the desktop.
#[derive(Default)]
pub struct RecordingHost {
    pub calls: Vec<HostCall>,
    pub directory: Option<PathBuf>,
}

impl RecordingHost {
    pub fn clipboard_writes(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                HostCall::Clipboard(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn last_height(&self) -> Option<u32> {
        self.calls.iter().rev().find_map(|call| match call {
            HostCall::Resize(height) => Some(*height),
            _ => None,
        })
    }

    pub fn hidden(&self) -> bool {
        self.calls.contains(&HostCall::Hide)
    }
}

impl HostWindow for RecordingHost {
    fn resize(&mut self, height: u32) {
        self.calls.push(HostCall::Resize(height));
    }

    fn hide(&mut self) {
        self.calls.push(HostCall::Hide);
    }

    fn begin_drag(&mut self, _origin: Point) {}

    fn drag_to(&mut self, point: Point) {
        self.calls.push(HostCall::DragTo(point));
    }

    fn end_drag(&mut self) {}

    fn open_external(&mut self, url: &str) -> Result<(), HostError> {
        self.calls.push(HostCall::OpenExternal(url.to_string()));
        Ok(())
    }

    fn write_clipboard_text(&mut self, text: &str) -> Result<(), HostError> {
        self.calls.push(HostCall::Clipboard(text.to_string()));
        Ok(())
    }

    fn select_directory(&mut self) -> Option<PathBuf> {
        self.directory.take()
    }

    fn list_subdirectories(&self, path: &Path) -> Result<Vec<Project>, HostError> {
        Ok(quicklaunch_core::projects::list_subdirectories(path)?)
    }

    fn open_in_editor(&mut self, path: &str) -> Result<(), HostError> {
        self.calls.push(HostCall::OpenInEditor(path.to_string()));
        Ok(())
    }

    fn open_system_terminal(&mut self) -> Result<(), HostError> {
        self.calls.push(HostCall::OpenTerminal);
        Ok(())
    }

    fn set_tray_mode(&mut self, enabled: bool) {
        self.calls.push(HostCall::TrayMode(enabled));
    }

    fn on_focus_requested(&mut self, _callback: FocusCallback) {}
}

fn server_error() -> SyncError {
    SyncError::Status {
        status: 500,
        message: "server unavailable".to_string(),
    }
}

/// In-memory bookmark server with switchable failures.
#[derive(Default)]
pub struct FakeSync {
    pub fail_login: bool,
    pub fail_add: bool,
    pub fail_list: bool,
    pub bookmarks: Mutex<Vec<BookmarkDto>>,
    pub tokens_seen: Mutex<Vec<String>>,
}

impl FakeSync {
    pub fn with_bookmarks(bookmarks: Vec<BookmarkDto>) -> Self {
        Self {
            bookmarks: Mutex::new(bookmarks),
            ..Default::default()
        }
    }
}

impl SyncClient for FakeSync {
    fn login(&self, request: &LoginRequest) -> Result<LoginResponse, SyncError> {
        if self.fail_login {
            return Err(server_error());
        }
        Ok(LoginResponse {
            token: format!("token-{}", request.username),
            username: None,
            name: None,
            user: None,
        })
    }

    fn add_bookmark(
        &self,
        request: &AddBookmarkRequest,
        token: Option<&str>,
    ) -> Result<BookmarkDto, SyncError> {
        if let Some(token) = token {
            self.tokens_seen.lock().unwrap().push(token.to_string());
        }
        if self.fail_add {
            return Err(server_error());
        }
        let mut bookmarks = self.bookmarks.lock().unwrap();
        let dto = BookmarkDto {
            id: Some(format!("srv-{}", bookmarks.len() + 1)),
            name: Some(request.name.clone()),
            url: Some(request.url.clone()),
            keywords: request.keywords.clone(),
        };
        bookmarks.push(dto.clone());
        Ok(dto)
    }

    fn list_bookmarks(&self, token: &str) -> Result<Vec<BookmarkDto>, SyncError> {
        self.tokens_seen.lock().unwrap().push(token.to_string());
        if self.fail_list {
            return Err(server_error());
        }
        Ok(self.bookmarks.lock().unwrap().clone())
    }
}

pub fn bookmark(id: &str, name: &str, url: &str) -> BookmarkDto {
    BookmarkDto {
        id: Some(id.to_string()),
        name: Some(name.to_string()),
        url: Some(url.to_string()),
        keywords: None,
    }
}

/// One-shot HTTP server on a loopback port. Answers `responses` in order,
/// one per connection, and yields the raw requests it received.
pub fn serve_http(responses: Vec<(u16, &'static str)>) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = std::thread::spawn(move || {
        let mut seen = Vec::new();
        for (status, body) in responses {
            let (mut stream, _) = listener.accept().unwrap();
            seen.push(read_request(&mut stream));
            let reply = format!(
                "HTTP/1.1 {status} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(reply.as_bytes()).unwrap();
            stream.flush().unwrap();
        }
        seen
    });

    (base_url, handle)
}

fn read_request(stream: &mut std::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0_u8; 1024];
    loop {
        let n = stream.read(&mut chunk).unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        let text = String::from_utf8_lossy(&buf);
        if let Some(end) = text.find("\r\n\r\n") {
            let length = text[..end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= end + 4 + length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}
