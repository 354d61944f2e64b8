//! # Guitar Master - 吉他大师
//!
//! This module contains the main GUI application for the Guitar Master
//! learning tool. It hosts the two canvas views (circle of fifths and
//! fretboard), the practice dialogs, and the persisted user settings.
//!
//! ## Architecture
//! - **Single Thread**: all rendering and hit-testing run synchronously
//!   on the UI thread in response to messages
//! - **State ownership**: each view owns its own selection state; the
//!   only cross-view channel is the settings file
//! - **Updates**: a timer subscription expires transient toasts

mod ui;

use anyhow::Context;
use iced::{Element, Subscription, Theme};
use std::time::Duration;
use theory_core::catalog::{self, Key, RelatedKeys, CIRCLE_OF_FIFTHS, GUITAR_STRINGS};
use theory_core::note;
use theory_core::settings::{DisplayMode, Settings};
use ui::feedback::Feedback;
use ui::main_display::create_main_view;

/// Where the settings blob lives, relative to the working directory.
const SETTINGS_PATH: &str = "user_settings.json";
/// How long a "note played" or "chord played" toast stays up.
const TOAST_DURATION: Duration = Duration::from_millis(1000);

/// Main entry point for the Guitar Master application.
pub fn main() -> iced::Result {
    eprintln!("[MAIN] Starting Guitar Master...");
    let result = iced::application("吉他大师 Guitar Master", GuitarApp::update, GuitarApp::view)
        .subscription(GuitarApp::subscription)
        .theme(GuitarApp::theme)
        .run();
    eprintln!("[MAIN] Application finished with result: {:?}", result);
    result
}

/// Application message types for the Iced GUI framework.
#[derive(Debug, Clone)]
pub enum Message {
    // Circle-of-fifths interactions
    CircleKeySelected(usize),      // Canvas hit-test resolved to a catalog index
    PlayChord(&'static str),       // A diatonic chord button was pressed
    PracticeChords,                // Show the I - vi - IV - V progression dialog

    // Fretboard interactions
    FretboardKeyPicked(String),    // Key chosen from the picker
    NotePlayed { string: u8, fret: u8 }, // Canvas touch resolved to a grid cell
    HighlightNote(&'static str),   // Scale-tone chip toggled
    SetDisplayMode(DisplayMode),   // Note-name / scale-degree label toggle
    StartNoteFinding,              // Root-finding practice dialog
    StartScalePractice,            // Scale-run practice dialog
    StartIntervalTraining,         // Shortcut into interval labels

    // Panels and application control
    ToggleCircle,                  // Show/hide the circle-of-fifths panel
    ToggleFretboard,               // Show/hide the fretboard panel
    ToggleDarkMode,                // Light/dark theme switch
    DismissModal,                  // Close the active dialog
    Tick,                          // Timer tick for toast expiry
}

/// Selection state owned exclusively by the circle-of-fifths view.
///
/// Starts with no selection (or the persisted key, when it resolves)
/// and never reverts to no-selection on its own.
#[derive(Debug, Clone)]
pub struct CircleState {
    pub selected: Option<&'static Key>,
    pub related: Option<RelatedKeys>,
}

/// Selection state owned exclusively by the fretboard view.
#[derive(Debug, Clone)]
pub struct FretboardState {
    pub current_key: &'static Key,
    pub highlighted_note: Option<&'static str>,
    pub display_mode: DisplayMode,
}

/// Main application state for Guitar Master.
#[derive(Debug)]
pub struct GuitarApp {
    // Persisted settings, written through on every change
    settings: Settings,

    // Per-view selection state
    pub circle: CircleState,
    pub fretboard: FretboardState,

    // Transient feedback surface (toasts, dialogs, haptic stub)
    pub feedback: Feedback,

    // Panel visibility
    pub circle_visible: bool,
    pub fretboard_visible: bool,
}

impl Default for GuitarApp {
    /// Creates the application with persisted settings applied.
    ///
    /// The stored key name is resolved against the catalog; a miss is
    /// logged and degrades to no circle selection and the default
    /// fretboard key rather than failing.
    fn default() -> Self {
        eprintln!("[MAIN] Creating GuitarApp...");
        let settings = load_settings(SETTINGS_PATH);

        let selected = match catalog::get_key(&settings.selected_key) {
            Ok(key) => Some(key),
            Err(e) => {
                eprintln!("[SETTINGS] {e}; starting without a selection");
                None
            }
        };
        let related = selected.and_then(|key| catalog::related_keys(key).ok());

        Self {
            circle: CircleState { selected, related },
            fretboard: FretboardState {
                current_key: selected.unwrap_or(&CIRCLE_OF_FIFTHS[0]),
                highlighted_note: None,
                display_mode: settings.display_mode,
            },
            feedback: Feedback::default(),
            circle_visible: true,
            fretboard_visible: true,
            settings,
        }
    }
}

impl GuitarApp {
    /// Handles application state updates based on incoming messages.
    fn update(&mut self, message: Message) {
        match message {
            Message::CircleKeySelected(index) => self.select_circle_key(index),
            Message::PlayChord(chord) => {
                self.feedback
                    .toast(format!("播放 {chord} 和弦"), TOAST_DURATION);
                self.feedback.pulse();
            }
            Message::PracticeChords => {
                if let Some(key) = self.circle.selected {
                    self.feedback.modal(
                        format!("{}和弦进行", key.name),
                        format!("尝试弹奏：{}", catalog::chord_progression(key)),
                    );
                }
            }
            Message::FretboardKeyPicked(name) => self.pick_fretboard_key(&name),
            Message::NotePlayed { string, fret } => self.play_note(string, fret),
            Message::HighlightNote(pitch) => {
                // Tapping the highlighted tone again clears the highlight.
                self.fretboard.highlighted_note =
                    if self.fretboard.highlighted_note == Some(pitch) {
                        None
                    } else {
                        Some(pitch)
                    };
                self.feedback.pulse();
            }
            Message::SetDisplayMode(mode) => self.set_display_mode(mode),
            Message::StartNoteFinding => {
                let root = self.fretboard.current_key.scale[0];
                self.feedback.modal(
                    "音符定位练习".to_string(),
                    format!("请在指板上找到所有的 {root} 音符位置"),
                );
            }
            Message::StartScalePractice => {
                self.feedback.modal(
                    "音阶练习".to_string(),
                    format!(
                        "练习{}音阶，按照 1-2-3-4-5-6-7-8 的顺序弹奏",
                        self.fretboard.current_key.name
                    ),
                );
            }
            Message::StartIntervalTraining => {
                self.set_display_mode(DisplayMode::Intervals);
                self.feedback
                    .toast("已切换到音程显示模式".to_string(), TOAST_DURATION);
            }
            Message::ToggleCircle => {
                self.circle_visible = !self.circle_visible;
            }
            Message::ToggleFretboard => {
                self.fretboard_visible = !self.fretboard_visible;
                if self.fretboard_visible {
                    // Re-activation picks up whatever key the other view
                    // persisted, mirroring the settings-only handoff.
                    self.sync_fretboard_from_settings();
                }
            }
            Message::ToggleDarkMode => {
                self.settings.dark_mode = !self.settings.dark_mode;
                self.persist_settings();
            }
            Message::DismissModal => self.feedback.dismiss_modal(),
            Message::Tick => self.feedback.expire_toast(),
        }
    }

    /// Applies a circle-of-fifths node selection.
    ///
    /// In order: related-key derivation, state update (the redraw
    /// follows from it), settings write, haptic pulse.
    fn select_circle_key(&mut self, index: usize) {
        let Some(key) = CIRCLE_OF_FIFTHS.get(index) else {
            eprintln!("[MAIN] Ignoring selection of unknown catalog index {index}");
            return;
        };
        match catalog::related_keys(key) {
            Ok(related) => self.circle.related = Some(related),
            Err(e) => eprintln!("[MAIN] Related-key derivation failed: {e}"),
        }
        self.circle.selected = Some(key);
        self.settings.selected_key = key.name.to_string();
        self.persist_settings();
        self.feedback.pulse();
    }

    /// Applies a key chosen from the fretboard's picker.
    fn pick_fretboard_key(&mut self, name: &str) {
        match catalog::get_key(name) {
            Ok(key) => {
                self.fretboard.current_key = key;
                self.fretboard.highlighted_note = None;
                self.settings.selected_key = key.name.to_string();
                self.persist_settings();
            }
            Err(e) => eprintln!("[MAIN] Ignoring key pick: {e}"),
        }
    }

    fn set_display_mode(&mut self, mode: DisplayMode) {
        self.fretboard.display_mode = mode;
        self.settings.display_mode = mode;
        self.persist_settings();
    }

    /// Resolves and "plays" the note under a fretboard touch.
    /// Transient feedback only; nothing is persisted.
    fn play_note(&mut self, string: u8, fret: u8) {
        let Some(info) = GUITAR_STRINGS.iter().find(|s| s.string_number == string) else {
            return;
        };
        match note::note_at(info.open_pitch_class, fret) {
            Ok(pitch) => {
                self.feedback
                    .toast(format!("{string}弦 {fret}品: {pitch}"), TOAST_DURATION);
                self.feedback.pulse();
            }
            Err(e) => eprintln!("[MAIN] Could not resolve note: {e}"),
        }
    }

    /// Reads the shared settings back from disk for the fretboard view.
    fn sync_fretboard_from_settings(&mut self) {
        let stored = load_settings(SETTINGS_PATH);
        if let Ok(key) = catalog::get_key(&stored.selected_key) {
            self.fretboard.current_key = key;
        }
    }

    fn persist_settings(&self) {
        if let Err(e) = save_settings(&self.settings, SETTINGS_PATH) {
            eprintln!("[SETTINGS] Error saving settings: {e:#}");
        }
    }

    /// Renders the main application interface.
    fn view(&self) -> Element<'_, Message> {
        create_main_view(self)
    }

    /// Timer subscription used to expire transient toasts.
    fn subscription(&self) -> Subscription<Message> {
        iced::time::every(Duration::from_millis(200)).map(|_| Message::Tick)
    }

    fn theme(&self) -> Theme {
        if self.settings.dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

// --- Settings file I/O ---

/// Loads the settings blob, falling back to defaults when the file is
/// missing or unreadable. Absence on first launch is the normal case.
fn load_settings(path: &str) -> Settings {
    match try_load_settings(path) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("[SETTINGS] Using defaults: {e:#}");
            Settings::default()
        }
    }
}

fn try_load_settings(path: &str) -> anyhow::Result<Settings> {
    let data = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    let settings = serde_json::from_str(&data).with_context(|| format!("parsing {path}"))?;
    Ok(settings)
}

/// Overwrites the settings blob wholesale.
fn save_settings(settings: &Settings, path: &str) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(settings).context("serializing settings")?;
    std::fs::write(path, json).with_context(|| format!("writing {path}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("guitar-master-test-{name}-{}", std::process::id()))
    }

    #[test]
    fn settings_round_trip_through_the_file() {
        let path = temp_path("roundtrip");
        let path_str = path.to_str().unwrap();
        let settings = Settings {
            selected_key: "A大调".to_string(),
            display_mode: DisplayMode::Intervals,
            dark_mode: true,
        };
        save_settings(&settings, path_str).unwrap();
        assert_eq!(load_settings(path_str), settings);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = temp_path("missing");
        assert_eq!(load_settings(path.to_str().unwrap()), Settings::default());
    }
}
