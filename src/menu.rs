use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::game::SettingsCommand;
use crate::settings::{SettingKey, Settings};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuRow {
    Setting(SettingKey),
    Start,
}

/// Cursor over the settings screen
#[derive(Debug, Clone, Default)]
pub struct SettingsMenu {
    cursor: usize,
}

impl SettingsMenu {
    pub fn rows() -> Vec<MenuRow> {
        SettingKey::ALL
            .iter()
            .copied()
            .map(MenuRow::Setting)
            .chain(std::iter::once(MenuRow::Start))
            .collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> MenuRow {
        Self::rows()[self.cursor]
    }

    /// `(label, value)` pairs in display order; Start has no value
    pub fn entries(settings: &Settings) -> Vec<(String, Option<String>)> {
        Self::rows()
            .into_iter()
            .map(|row| match row {
                MenuRow::Setting(key) => (key.to_string(), Some(settings.get(key).to_string())),
                MenuRow::Start => ("Start".to_string(), None),
            })
            .collect()
    }

    /// Handle a key on the settings screen, returning a command for the game if any
    pub fn on_key(&mut self, key: &KeyEvent) -> Option<SettingsCommand> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        let len = Self::rows().len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = (self.cursor + len - 1) % len;
                None
            }
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
                self.cursor = (self.cursor + 1) % len;
                None
            }
            KeyCode::Left | KeyCode::Char('h') => self.adjust(-1),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => self.adjust(1),
            KeyCode::Enter => match self.selected() {
                MenuRow::Start => Some(SettingsCommand::Start),
                MenuRow::Setting(key) => Some(SettingsCommand::Adjust { key, delta: 1 }),
            },
            _ => None,
        }
    }

    fn adjust(&self, delta: i8) -> Option<SettingsCommand> {
        match self.selected() {
            MenuRow::Setting(key) => Some(SettingsCommand::Adjust { key, delta }),
            MenuRow::Start => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn cursor_wraps() {
        let mut menu = SettingsMenu::default();
        menu.on_key(&press(KeyCode::Up));
        assert_eq!(menu.selected(), MenuRow::Start);
        menu.on_key(&press(KeyCode::Down));
        assert_eq!(menu.cursor(), 0);
    }

    #[test]
    fn enter_on_start_starts() {
        let mut menu = SettingsMenu::default();
        for _ in 0..SettingKey::ALL.len() {
            menu.on_key(&press(KeyCode::Down));
        }
        assert_eq!(
            menu.on_key(&press(KeyCode::Enter)),
            Some(SettingsCommand::Start)
        );
        assert_eq!(menu.on_key(&press(KeyCode::Left)), None);
    }

    #[test]
    fn left_right_adjust_selected_setting() {
        let mut menu = SettingsMenu::default();
        assert_eq!(
            menu.on_key(&press(KeyCode::Right)),
            Some(SettingsCommand::Adjust {
                key: SettingKey::ShowExactSeconds,
                delta: 1
            })
        );
        menu.on_key(&press(KeyCode::Down));
        assert_eq!(
            menu.on_key(&press(KeyCode::Left)),
            Some(SettingsCommand::Adjust {
                key: SettingKey::ShowExactFrames,
                delta: -1
            })
        );
    }

    #[test]
    fn entries_show_current_values() {
        let entries = SettingsMenu::entries(&Settings::default());
        assert_eq!(entries.len(), 7);
        assert_eq!(
            entries[0],
            ("Show Exact Time in Seconds".to_string(), Some("OFF".to_string()))
        );
        assert_eq!(
            entries[4],
            ("Number Pool".to_string(), Some("Integers".to_string()))
        );
        assert_eq!(entries[6], ("Start".to_string(), None));
    }
}
