//! Log file location, ANSI stripping, and timestamps.
use std::fs;
use std::path::PathBuf;

/// Remove ANSI escape sequences so log files stay plain text.
///
/// A CSI sequence (`ESC [`) runs up to its final byte in `@`..=`~`; any
/// other escape drops just the character after `ESC`.
pub(super) fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(esc) = rest.find('\x1b') {
        out.push_str(&rest[..esc]);
        let after = &rest[esc + 1..];
        rest = match after.strip_prefix('[') {
            Some(csi) => csi
                .find(|c: char| ('@'..='~').contains(&c))
                .map_or("", |end| &csi[end + 1..]),
            None => after
                .chars()
                .next()
                .map_or("", |c| &after[c.len_utf8()..]),
        };
    }
    out.push_str(rest);
    out
}

/// Per-command log directory: `$XDG_CACHE_HOME/commitkit`, else
/// `~/.cache/commitkit`.  Created on first use.
fn log_dir() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CACHE_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var_os("HOME")
                .or_else(|| std::env::var_os("USERPROFILE"))
                .map(|home| PathBuf::from(home).join(".cache"))
        })?;
    let dir = base.join("commitkit");
    fs::create_dir_all(&dir).ok()?;
    Some(dir)
}

/// Log file for `command`, e.g. `setup.log`.
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    Some(log_dir()?.join(format!("{command}.log")))
}

/// Current UTC wall-clock time, `HH:MM:SS`.
pub(super) fn clock() -> String {
    chrono::Utc::now().format("%H:%M:%S").to_string()
}
