use std::path::PathBuf;

use crate::config::Config;

pub const SAFE_HOTKEY_PRESETS: [&str; 5] = [
    "Shift+F",
    "Ctrl+Shift+Space",
    "Alt+Shift+Space",
    "Ctrl+Shift+P",
    "Ctrl+Alt+P",
];

/// Values edited on the settings page before they are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsDraft {
    pub hotkey: String,
    pub api_base_url: String,
    pub tray_mode: bool,
    pub project_root: Option<PathBuf>,
}

impl SettingsDraft {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            hotkey: cfg.hotkey.clone(),
            api_base_url: cfg.api_base_url.clone(),
            tray_mode: cfg.tray_mode,
            project_root: cfg.project_root.clone(),
        }
    }

    /// Validates every field and writes the canonical values into `cfg`.
    /// `cfg` is untouched when any field is rejected.
    pub fn apply_to(&self, cfg: &mut Config) -> Result<(), String> {
        let hotkey = validate_hotkey(&self.hotkey)?;
        let api_base_url = validate_api_base_url(&self.api_base_url)?;
        cfg.hotkey = hotkey;
        cfg.api_base_url = api_base_url;
        cfg.tray_mode = self.tray_mode;
        cfg.project_root = self.project_root.clone();
        Ok(())
    }
}

/// Returns the URL without a trailing slash.
pub fn validate_api_base_url(input: &str) -> Result<String, String> {
    let trimmed = input.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err("API base URL is required.".to_string());
    }
    let parsed =
        reqwest::Url::parse(trimmed).map_err(|e| format!("API base URL is invalid: {e}"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err("API base URL must use http or https.".to_string());
    }
    Ok(trimmed.to_string())
}

/// Global shortcut that shows the launcher. The core only validates it; the
/// host registers the canonical text it finds in the state snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hotkey {
    ctrl: bool,
    alt: bool,
    shift: bool,
    key: HotkeyKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HotkeyKey {
    Char(char),
    Space,
    Function(u8),
}

impl Hotkey {
    /// Accepts any case and spacing, e.g. `control + shift + p`.
    pub fn parse(input: &str) -> Result<Self, String> {
        let mut parts: Vec<&str> = input
            .split('+')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();
        let key = match parts.pop() {
            Some(key) if !parts.is_empty() => parse_key(key)?,
            _ => return Err("Hotkey must include at least one modifier and one key.".to_string()),
        };

        let mut hotkey = Self {
            ctrl: false,
            alt: false,
            shift: false,
            key,
        };
        for part in parts {
            let flag = match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => &mut hotkey.ctrl,
                "alt" => &mut hotkey.alt,
                "shift" => &mut hotkey.shift,
                "win" | "windows" | "meta" | "super" | "cmd" => {
                    return Err("Win/Meta combinations are not supported.".to_string())
                }
                _ => return Err(format!("Unsupported modifier '{part}'. Use Ctrl, Alt, or Shift.")),
            };
            *flag = true;
        }
        Ok(hotkey)
    }

    /// Combinations the desktop keeps for itself.
    pub fn is_reserved(&self) -> bool {
        let only = |ctrl, alt, shift| (self.ctrl, self.alt, self.shift) == (ctrl, alt, shift);
        match self.key {
            HotkeyKey::Function(4) | HotkeyKey::Space => only(false, true, false),
            HotkeyKey::Char('C' | 'V' | 'X') => only(true, false, false),
            _ => false,
        }
    }
}

impl std::fmt::Display for Hotkey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (held, name) in [(self.ctrl, "Ctrl+"), (self.alt, "Alt+"), (self.shift, "Shift+")] {
            if held {
                f.write_str(name)?;
            }
        }
        match self.key {
            HotkeyKey::Char(c) => write!(f, "{c}"),
            HotkeyKey::Space => f.write_str("Space"),
            HotkeyKey::Function(n) => write!(f, "F{n}"),
        }
    }
}

fn parse_key(input: &str) -> Result<HotkeyKey, String> {
    let upper = input.to_ascii_uppercase();
    if upper == "SPACE" {
        return Ok(HotkeyKey::Space);
    }
    let mut chars = upper.chars();
    match (chars.next(), chars.as_str()) {
        (Some(c), "") if c.is_ascii_alphanumeric() => Ok(HotkeyKey::Char(c)),
        (Some('F'), digits) => match digits.parse::<u8>() {
            Ok(n) if (1..=24).contains(&n) => Ok(HotkeyKey::Function(n)),
            _ => Err("Function key must be between F1 and F24.".to_string()),
        },
        _ => Err("Key must be A-Z, 0-9, Space, or F1-F24.".to_string()),
    }
}

/// Canonical text of a hotkey the launcher may claim.
pub fn validate_hotkey(input: &str) -> Result<String, String> {
    let hotkey = Hotkey::parse(input)?;
    if hotkey.is_reserved() {
        return Err(
            "This hotkey is commonly reserved by the system. Choose a different one.".to_string(),
        );
    }
    Ok(hotkey.to_string())
}
