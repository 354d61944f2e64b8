//! # Main Display Module
//!
//! This module contains the main display components and layout logic
//! for the Guitar Master application.

use iced::widget::text::{IntoFragment, Shaping};
use iced::widget::{button, column, container, pick_list, row, text, Space};
use iced::{Alignment, Element, Length};
use theory_core::catalog;
use theory_core::settings::DisplayMode;

use super::{circle_view, fretboard_view};


/// Text helper for labels containing CJK glyphs, which need advanced
/// shaping to render.
fn zh<'a>(content: impl IntoFragment<'a>) -> iced::widget::Text<'a> {
    text(content).shaping(Shaping::Advanced)
}

/// Configuration for a single button in the sidebar
#[derive(Debug, Clone)]
struct ButtonConfig {
    label: &'static str,
    message: crate::Message,
}

/// Static sidebar configuration - no need for a function
const SIDEBAR_CONFIG: &[(&str, &[ButtonConfig])] = &[
    ("面板", &[
        ButtonConfig { label: "五度圈", message: crate::Message::ToggleCircle },
        ButtonConfig { label: "指板", message: crate::Message::ToggleFretboard },
    ]),
    ("练习", &[
        ButtonConfig { label: "和弦进行", message: crate::Message::PracticeChords },
        ButtonConfig { label: "音符定位", message: crate::Message::StartNoteFinding },
        ButtonConfig { label: "音阶练习", message: crate::Message::StartScalePractice },
        ButtonConfig { label: "音程训练", message: crate::Message::StartIntervalTraining },
    ]),
    ("外观", &[
        ButtonConfig { label: "深色模式", message: crate::Message::ToggleDarkMode },
    ]),
];

/// Creates the complete main application view
pub fn create_main_view(app: &crate::GuitarApp) -> Element<'static, crate::Message> {
    let title = zh("吉他大师 Guitar Master").size(28);

    // Build UI panels using dedicated helper methods
    let circle_panel = create_circle_panel(app);
    let fretboard_panel = create_fretboard_panel(app);
    let sidebar = create_sidebar();

    let mut panels = column![].spacing(10);
    if let Some(modal) = create_modal_card(app) {
        panels = panels.push(modal);
    }
    if let Some(panel) = circle_panel {
        panels = panels.push(panel);
    }
    if let Some(panel) = fretboard_panel {
        panels = panels.push(panel);
    }

    let mut content = column![title, Space::with_height(10), panels]
        .width(Length::Fill)
        .spacing(10);

    // Toast strip along the bottom
    if let Some(message) = app.feedback.active_toast() {
        content = content.push(
            container(zh(message.to_string()).size(14))
                .padding([6, 12])
                .center_x(Length::Fill),
        );
    }

    let main_content = row![content, Space::with_width(10), sidebar]
        .align_y(Alignment::Start)
        .padding(20);

    container(main_content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Creates the circle-of-fifths panel with its related-keys column.
fn create_circle_panel(app: &crate::GuitarApp) -> Option<Element<'static, crate::Message>> {
    if !app.circle_visible {
        return None;
    }

    let canvas = circle_view::CircleOfFifths::new(app.circle.selected).view();

    let panel = container(
        column![
            zh("五度圈 Circle of Fifths").size(18),
            Space::with_height(10),
            row![
                container(canvas).width(Length::FillPortion(2)),
                Space::with_width(10),
                container(create_related_panel(app)).width(Length::FillPortion(1)),
            ]
            .align_y(Alignment::Start)
        ]
        .spacing(5)
        .padding(15),
    )
    .width(Length::Fill);

    Some(panel.into())
}

/// Creates the related-keys column shown beside the circle canvas.
fn create_related_panel(app: &crate::GuitarApp) -> Element<'static, crate::Message> {
    let Some(key) = app.circle.selected else {
        return zh("点击一个调性查看相关调").size(14).into();
    };

    let mut related_column = column![zh(key.name.to_string()).size(20)].spacing(5);

    if let Some(related) = &app.circle.related {
        related_column = related_column
            .push(zh(format!("属调 (V): {}", related.dominant.name)).size(14))
            .push(zh(format!("下属调 (IV): {}", related.subdominant.name)).size(14))
            .push(zh(format!("相对小调: {}小调", related.relative_minor)).size(14));
    }

    // Diatonic chord row: each chord "plays" as a toast + pulse
    let mut chord_row = row![].spacing(5);
    for &chord in &key.chords {
        chord_row = chord_row.push(
            button(text(chord).size(12)).on_press(crate::Message::PlayChord(chord)),
        );
    }

    related_column
        .push(Space::with_height(10))
        .push(zh("顺阶和弦").size(14))
        .push(chord_row)
        .into()
}

/// Creates the fretboard panel with its key picker and tone chips.
fn create_fretboard_panel(app: &crate::GuitarApp) -> Option<Element<'static, crate::Message>> {
    if !app.fretboard_visible {
        return None;
    }

    let state = &app.fretboard;

    let picker = pick_list(
        catalog::key_names(),
        Some(state.current_key.name.to_string()),
        crate::Message::FretboardKeyPicked,
    )
    .text_shaping(Shaping::Advanced);

    let mode_row = row![
        button(zh("音名").size(12))
            .on_press(crate::Message::SetDisplayMode(DisplayMode::Notes)),
        button(zh("音程").size(12))
            .on_press(crate::Message::SetDisplayMode(DisplayMode::Intervals)),
    ]
    .spacing(5);

    let canvas = fretboard_view::Fretboard::new(
        state.current_key,
        state.highlighted_note,
        state.display_mode,
    )
    .view();

    // Scale-tone chips: tapping toggles the fretboard highlight
    let mut tone_row = row![].spacing(5);
    for &tone in &state.current_key.scale {
        tone_row = tone_row.push(
            button(text(tone).size(12)).on_press(crate::Message::HighlightNote(tone)),
        );
    }

    let panel = container(
        column![
            zh("指板 Fretboard").size(18),
            Space::with_height(10),
            row![picker, Space::with_width(10), mode_row].align_y(Alignment::Center),
            Space::with_height(10),
            canvas,
            Space::with_height(10),
            tone_row,
        ]
        .spacing(5)
        .padding(15),
    )
    .width(Length::Fill);

    Some(panel.into())
}

/// Creates the sidebar from the static button configuration.
fn create_sidebar() -> Element<'static, crate::Message> {
    let mut sidebar = column![].spacing(8).width(Length::Fixed(160.0));

    for (section, buttons) in SIDEBAR_CONFIG {
        sidebar = sidebar.push(zh(*section).size(16));
        for config in *buttons {
            sidebar = sidebar.push(
                button(zh(config.label).size(14))
                    .width(Length::Fill)
                    .on_press(config.message.clone()),
            );
        }
        sidebar = sidebar.push(Space::with_height(10));
    }

    container(sidebar).padding(10).into()
}

/// Renders the active dialog card above the panels, if any.
fn create_modal_card(app: &crate::GuitarApp) -> Option<Element<'static, crate::Message>> {
    let modal = app.feedback.active_modal()?;

    let card = container(
        column![
            zh(modal.title.clone()).size(18),
            Space::with_height(5),
            zh(modal.body.clone()).size(14),
            Space::with_height(10),
            button(zh("知道了").size(14)).on_press(crate::Message::DismissModal),
        ]
        .spacing(5)
        .padding(15)
        .align_x(Alignment::Center),
    )
    .center_x(Length::Fill);

    Some(card.into())
}
