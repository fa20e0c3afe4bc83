use ratatui::Frame;

use holdfast::game::GameState;

use crate::{ui::SettingsView, App};

/// A UI Screen boundary: responsible for rendering one kind of game state
pub trait Screen {
    fn render(&self, app: &App, f: &mut Frame);
}

/// Any state that is just centred text lines plus the optional circle
pub struct TextScreen;

impl Screen for TextScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        f.render_widget(app.game_view(), f.area());
    }
}

/// Customisation menu
pub struct SettingsScreen;

impl Screen for SettingsScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        f.render_widget(SettingsView { app }, f.area());
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: GameState) -> Box<dyn Screen> {
    match state {
        GameState::Settings => Box::new(SettingsScreen),
        GameState::Intro
        | GameState::NumberShow
        | GameState::NumberEstimate
        | GameState::NumberResult
        | GameState::GameEnd
        | GameState::Faulted => Box::new(TextScreen),
    }
}
