//! Line-oriented command grammar for scripted desktop sessions.

use desktop_runtime::keybindings::KeyPress;
use desktop_runtime::{AppId, DesktopAction, DesktopError, DesktopResult, OverlayKind, ThemeMode};

/// One parsed script line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Forwarded to the store as-is.
    Dispatch(DesktopAction),
    ListWindows,
    StageRail,
    RenderPlan,
    Search(String),
    /// 1-based index into the last search results.
    Launch(usize),
    Key(KeyPress),
    Help,
}

pub const USAGE: &str = "\
windows list | rail | plan
windows open|focus|restore|close|minimize|maximize <app-id>
windows move <app-id> <x> <y>
windows resize <app-id> <width> <height>
stage on|off|toggle
overlay spotlight|control-center on|off|toggle
search <query>
launch <n>
key ctrl+space | cmd+space | escape
login <password>
logout
theme light|dark
wallpaper <url>
help";

/// Parses one line. Blank lines and `#` comments yield `Ok(None)`.
///
/// # Errors
///
/// Returns [`DesktopError::InvalidCommand`] for malformed lines and
/// [`DesktopError::UnknownApp`] for ids outside the window set.
pub fn parse_line(line: &str) -> DesktopResult<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (head, rest) = split_word(line);
    let command = match head {
        "windows" => parse_windows(rest)?,
        "stage" => Command::Dispatch(match expect_one(rest, "stage on|off|toggle")? {
            "toggle" => DesktopAction::ToggleStageMode,
            raw => DesktopAction::SetStageMode {
                enabled: parse_bool_flag(raw)?,
            },
        }),
        "overlay" => {
            let (kind, state) = split_word(rest);
            let overlay: OverlayKind = kind.parse()?;
            Command::Dispatch(match expect_one(state, "overlay <kind> on|off|toggle")? {
                "toggle" => DesktopAction::ToggleOverlay { overlay },
                raw => DesktopAction::SetOverlay {
                    overlay,
                    open: parse_bool_flag(raw)?,
                },
            })
        }
        "search" => Command::Search(non_empty(rest, "search <query>")?.to_string()),
        "launch" => {
            let raw = expect_one(rest, "launch <n>")?;
            match raw.parse::<usize>() {
                Ok(index) if index > 0 => Command::Launch(index),
                _ => return Err(usage(format!("invalid result index `{raw}`"))),
            }
        }
        "key" => Command::Key(parse_key(expect_one(rest, "key <combo>")?)),
        "login" => Command::Dispatch(DesktopAction::Login {
            password: rest.to_string(),
        }),
        "logout" => {
            expect_none(rest, "logout")?;
            Command::Dispatch(DesktopAction::Logout)
        }
        "theme" => Command::Dispatch(DesktopAction::SetTheme {
            theme: match expect_one(rest, "theme light|dark")? {
                "light" => ThemeMode::Light,
                "dark" => ThemeMode::Dark,
                other => return Err(usage(format!("unknown theme `{other}`"))),
            },
        }),
        "wallpaper" => Command::Dispatch(DesktopAction::SetWallpaper {
            wallpaper: expect_one(rest, "wallpaper <url>")?.to_string(),
        }),
        "help" => Command::Help,
        other => return Err(usage(format!("unknown command `{other}`"))),
    };
    Ok(Some(command))
}

fn parse_windows(rest: &str) -> DesktopResult<Command> {
    let (verb, args) = split_word(rest);
    let args: Vec<&str> = args.split_whitespace().collect();
    let command = match (verb, args.as_slice()) {
        ("list", []) => Command::ListWindows,
        ("rail", []) => Command::StageRail,
        ("plan", []) => Command::RenderPlan,
        ("open", [id]) => Command::Dispatch(DesktopAction::OpenApp {
            app_id: id.parse()?,
        }),
        ("focus" | "restore", [id]) => Command::Dispatch(DesktopAction::FocusWindow {
            app_id: id.parse()?,
        }),
        ("close", [id]) => Command::Dispatch(DesktopAction::CloseWindow {
            app_id: id.parse()?,
        }),
        ("minimize", [id]) => Command::Dispatch(DesktopAction::MinimizeWindow {
            app_id: id.parse()?,
        }),
        ("maximize", [id]) => Command::Dispatch(DesktopAction::ToggleMaximize {
            app_id: id.parse()?,
        }),
        ("move", [id, x, y]) => Command::Dispatch(DesktopAction::MoveWindow {
            app_id: id.parse()?,
            x: parse_int(x)?,
            y: parse_int(y)?,
        }),
        ("resize", [id, w, h]) => Command::Dispatch(DesktopAction::ResizeWindow {
            app_id: id.parse::<AppId>()?,
            width: parse_int(w)?,
            height: parse_int(h)?,
        }),
        _ => return Err(usage(format!("usage: windows {verb} ... (see `help`)"))),
    };
    Ok(command)
}

fn parse_key(raw: &str) -> KeyPress {
    match raw.to_ascii_lowercase().as_str() {
        "ctrl+space" => KeyPress::with_ctrl(" "),
        "cmd+space" | "meta+space" => KeyPress::with_meta(" "),
        "escape" | "esc" => KeyPress::plain("Escape"),
        "space" => KeyPress::plain(" "),
        _ => KeyPress::plain(raw),
    }
}

fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim();
    match input.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (input, ""),
    }
}

fn expect_one<'a>(rest: &'a str, usage_line: &str) -> DesktopResult<&'a str> {
    let mut words = rest.split_whitespace();
    match (words.next(), words.next()) {
        (Some(word), None) => Ok(word),
        _ => Err(usage(format!("usage: {usage_line}"))),
    }
}

fn expect_none(rest: &str, usage_line: &str) -> DesktopResult<()> {
    if rest.is_empty() {
        Ok(())
    } else {
        Err(usage(format!("usage: {usage_line}")))
    }
}

fn non_empty<'a>(rest: &'a str, usage_line: &str) -> DesktopResult<&'a str> {
    if rest.is_empty() {
        Err(usage(format!("usage: {usage_line}")))
    } else {
        Ok(rest)
    }
}

fn parse_bool_flag(raw: &str) -> DesktopResult<bool> {
    match raw {
        "on" | "true" | "1" => Ok(true),
        "off" | "false" | "0" => Ok(false),
        _ => Err(usage(format!("expected on/off, got `{raw}`"))),
    }
}

fn parse_int(raw: &str) -> DesktopResult<i32> {
    raw.parse()
        .map_err(|_| usage(format!("expected an integer, got `{raw}`")))
}

fn usage(message: impl Into<String>) -> DesktopError {
    DesktopError::InvalidCommand(message.into())
}
