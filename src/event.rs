use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

/// Blocks up to `timeout` for the next key press. Repeat and release
/// events are skipped so a held key does not double-fire on Windows.
pub fn next_key(timeout: Duration) -> color_eyre::Result<Option<KeyEvent>> {
    loop {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(Some(key)),
            _ => continue,
        }
    }
}
