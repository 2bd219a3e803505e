//! Key bindings.
//!
//! Translates Zellij key presses into [`Event`]s for the current focus.
//! The viewer's bindings take precedence over the grid's, and `Ctrl+n` /
//! `Ctrl+p` move the selection from anywhere.

use super::handler::Event;
use super::modes::{InputMode, ViewMode};
use zellij_tile::prelude::{BareKey, KeyModifier, KeyWithModifier};

/// Maps a key press to an application event, or `None` if it is unbound.
#[must_use]
pub fn map_key_event(
    input_mode: InputMode,
    view_mode: ViewMode,
    key: &KeyWithModifier,
) -> Option<Event> {
    tracing::trace!(bare_key = ?key.bare_key, "key event");

    if key.has_modifiers(&[KeyModifier::Ctrl]) {
        return match key.bare_key {
            BareKey::Char('n') => Some(Event::MoveDown),
            BareKey::Char('p') => Some(Event::MoveUp),
            _ => None,
        };
    }

    if let ViewMode::Viewer { .. } = view_mode {
        return Some(match key.bare_key {
            BareKey::Esc | BareKey::Char('q') => Event::CloseViewer,
            BareKey::Left | BareKey::Char('h') => Event::ViewerPrev,
            BareKey::Right | BareKey::Char('l') => Event::ViewerNext,
            BareKey::Char('o') => Event::OpenExternal,
            _ => return None,
        });
    }

    Some(match input_mode {
        InputMode::Typing => match key.bare_key {
            BareKey::Enter => Event::Submit,
            BareKey::Esc | BareKey::Tab => Event::FocusGallery,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        },
        InputMode::Browsing => match key.bare_key {
            BareKey::Left | BareKey::Char('h') => Event::MoveLeft,
            BareKey::Right | BareKey::Char('l') => Event::MoveRight,
            BareKey::Up | BareKey::Char('k') => Event::MoveUp,
            BareKey::Down | BareKey::Char('j') => Event::MoveDown,
            BareKey::Enter => Event::OpenViewer,
            BareKey::Char('m' | ' ') => Event::LoadMore,
            BareKey::Char('o') => Event::OpenExternal,
            BareKey::Char('r') => Event::Retry,
            BareKey::Char('x') => Event::DismissError,
            BareKey::Char('/') => Event::FocusSearchBar,
            BareKey::Esc | BareKey::Char('q') => Event::CloseFocus,
            _ => return None,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRID: ViewMode = ViewMode::Grid;
    const VIEWER: ViewMode = ViewMode::Viewer { index: 0 };

    fn key(bare: BareKey) -> KeyWithModifier {
        KeyWithModifier::new(bare)
    }

    #[test]
    fn typing_sends_letters_to_the_draft() {
        for c in ['j', 'q', '/', 'm'] {
            assert_eq!(
                map_key_event(InputMode::Typing, GRID, &key(BareKey::Char(c))),
                Some(Event::Char(c))
            );
        }
        assert_eq!(
            map_key_event(InputMode::Typing, GRID, &key(BareKey::Enter)),
            Some(Event::Submit)
        );
        assert_eq!(
            map_key_event(InputMode::Typing, GRID, &key(BareKey::Tab)),
            Some(Event::FocusGallery)
        );
    }

    #[test]
    fn browsing_keys_drive_the_grid() {
        let cases = [
            (BareKey::Char('j'), Event::MoveDown),
            (BareKey::Left, Event::MoveLeft),
            (BareKey::Enter, Event::OpenViewer),
            (BareKey::Char(' '), Event::LoadMore),
            (BareKey::Char('r'), Event::Retry),
            (BareKey::Char('x'), Event::DismissError),
            (BareKey::Char('/'), Event::FocusSearchBar),
            (BareKey::Esc, Event::CloseFocus),
        ];
        for (bare, expected) in cases {
            assert_eq!(map_key_event(InputMode::Browsing, GRID, &key(bare)), Some(expected));
        }
        assert_eq!(map_key_event(InputMode::Browsing, GRID, &key(BareKey::Char('z'))), None);
    }

    #[test]
    fn viewer_keys_take_precedence() {
        assert_eq!(
            map_key_event(InputMode::Browsing, VIEWER, &key(BareKey::Esc)),
            Some(Event::CloseViewer)
        );
        assert_eq!(
            map_key_event(InputMode::Browsing, VIEWER, &key(BareKey::Char('l'))),
            Some(Event::ViewerNext)
        );
        assert_eq!(map_key_event(InputMode::Browsing, VIEWER, &key(BareKey::Enter)), None);
    }

    #[test]
    fn ctrl_navigation_works_everywhere() {
        let ctrl_n = KeyWithModifier::new(BareKey::Char('n')).with_ctrl_modifier();
        assert_eq!(map_key_event(InputMode::Typing, GRID, &ctrl_n), Some(Event::MoveDown));

        let ctrl_c = KeyWithModifier::new(BareKey::Char('c')).with_ctrl_modifier();
        assert_eq!(map_key_event(InputMode::Typing, GRID, &ctrl_c), None);
    }
}
