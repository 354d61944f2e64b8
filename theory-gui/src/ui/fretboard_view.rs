//! # Fretboard Widget
//!
//! This module provides the 6-string, 12-fret fretboard canvas. It
//! draws the active key's scale tones as markers (root highlighted)
//! and maps clicks to the nearest (string, fret) cell to "play" the
//! note there.
//!
//! ## Features
//! - 12-fret grid with string gauge and inlay dots
//! - Scale-tone markers via the pitch-class locator
//! - Note-name or scale-degree labels (mutually exclusive)
//! - Click-to-play with silent rejection of out-of-grid touches

use iced::widget::canvas::{self, event, Event, Geometry, Path, Stroke, Text};
use iced::widget::container;
use iced::{alignment, mouse, Color, Element, Length, Point, Rectangle, Renderer, Size, Theme};
use theory_core::catalog::{Key, GUITAR_STRINGS};
use theory_core::locator::{self, MAX_FRET};
use theory_core::settings::DisplayMode;
use theory_core::TheoryError;

/// Frets carrying a cosmetic inlay dot. Fret 12 gets two.
const MARKER_FRETS: [u8; 5] = [3, 5, 7, 9, 12];
/// Radius of a scale-tone marker.
const NOTE_MARKER_RADIUS: f32 = 15.0;

/// Grid cell under a surface-local pointer position.
///
/// The grid divides the width into 12 fret columns and the height into
/// 7 string rows (one row of margin). Positions rounding outside
/// fret 0..=12 or string 1..=6 are out of range; callers treat that as
/// a silent no-op.
///
/// # Returns
/// * `Ok((string, fret))` - The nearest valid cell
/// * `Err(OutOfRange)` - Pointer outside the playable grid
pub fn grid_position(x: f32, y: f32, size: Size) -> Result<(u8, u8), TheoryError> {
    let fret_spacing = size.width / 12.0;
    let string_spacing = size.height / 7.0;

    let fret = (x / fret_spacing).round() as i32;
    let string = (y / string_spacing).round() as i32;

    if (0..=i32::from(MAX_FRET)).contains(&fret) && (1..=6).contains(&string) {
        Ok((string as u8, fret as u8))
    } else {
        Err(TheoryError::OutOfRange)
    }
}

/// Horizontal marker position for a fret. Open-string notes sit left
/// of the nut at a fixed fractional offset; fretted notes are centered
/// within their fret cell.
fn marker_x(fret: u8, fret_spacing: f32) -> f32 {
    if fret == 0 {
        0.3 * fret_spacing
    } else {
        (f32::from(fret) - 0.5) * fret_spacing
    }
}

/// Interactive fretboard widget.
#[derive(Debug, Clone)]
pub struct Fretboard {
    key: &'static Key,
    highlighted_note: Option<&'static str>,
    display_mode: DisplayMode,
}

impl Fretboard {
    pub fn new(
        key: &'static Key,
        highlighted_note: Option<&'static str>,
        display_mode: DisplayMode,
    ) -> Self {
        Self {
            key,
            highlighted_note,
            display_mode,
        }
    }

    pub fn view(self) -> Element<'static, crate::Message> {
        container(
            canvas::Canvas::new(self)
                .width(Length::Fill)
                .height(Length::Fixed(220.0)),
        )
        .into()
    }
}

impl canvas::Program<crate::Message> for Fretboard {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> (event::Status, Option<crate::Message>) {
        if let Some(position) = cursor.position_in(bounds) {
            if let Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) = event {
                // Out-of-grid touches fall through untouched.
                if let Ok((string, fret)) =
                    grid_position(position.x, position.y, bounds.size())
                {
                    return (
                        event::Status::Captured,
                        Some(crate::Message::NotePlayed { string, fret }),
                    );
                }
            }
        }
        (event::Status::Ignored, None)
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        let fret_spacing = bounds.width / 12.0;
        let string_spacing = bounds.height / 7.0;

        // Wood background
        frame.fill_rectangle(
            Point::ORIGIN,
            bounds.size(),
            Color::from_rgb8(0xD2, 0x69, 0x1E),
        );

        // Fret lines
        for fret in 1..=12u8 {
            let x = f32::from(fret) * fret_spacing;
            frame.stroke(
                &Path::line(Point::new(x, 0.0), Point::new(x, bounds.height)),
                Stroke::default()
                    .with_width(2.0)
                    .with_color(Color::from_rgb8(0xCC, 0xCC, 0xCC)),
            );
        }

        // Strings, bass strings drawn thicker
        for string in &GUITAR_STRINGS {
            let y = f32::from(string.string_number) * string_spacing;
            let gauge = 1.0 + f32::from(64 - string.baseline_offset) / 8.0;
            frame.stroke(
                &Path::line(Point::new(0.0, y), Point::new(bounds.width, y)),
                Stroke::default()
                    .with_width(gauge)
                    .with_color(Color::from_rgb8(0xC0, 0xC0, 0xC0)),
            );
        }

        // Inlay dots
        for &fret in &MARKER_FRETS {
            let x = (f32::from(fret) - 0.5) * fret_spacing;
            if fret == 12 {
                frame.fill(
                    &Path::circle(Point::new(x, bounds.height * 0.3), 6.0),
                    Color::WHITE,
                );
                frame.fill(
                    &Path::circle(Point::new(x, bounds.height * 0.7), 6.0),
                    Color::WHITE,
                );
            } else {
                frame.fill(
                    &Path::circle(Point::new(x, bounds.height * 0.5), 8.0),
                    Color::WHITE,
                );
            }
        }

        self.draw_scale_markers(&mut frame, fret_spacing, string_spacing);

        vec![frame.into_geometry()]
    }
}

impl Fretboard {
    /// Draws a marker for every position of every scale tone.
    ///
    /// Fill precedence, highest first: root tone, highlighted tone,
    /// plain scale tone. Labels follow the display mode.
    fn draw_scale_markers(
        &self,
        frame: &mut canvas::Frame,
        fret_spacing: f32,
        string_spacing: f32,
    ) {
        for (degree, &tone) in self.key.scale.iter().enumerate() {
            // A miss here means a spelling outside the recognized set;
            // the tone is simply not drawn.
            let Ok(positions) = locator::locate(tone, &GUITAR_STRINGS, MAX_FRET) else {
                continue;
            };

            let is_root = degree == 0;
            let is_highlighted = self.highlighted_note == Some(tone);
            let fill = if is_root {
                Color::from_rgb8(0xFF, 0x44, 0x44)
            } else if is_highlighted {
                Color::from_rgb8(0x1A, 0x1A, 0x1A)
            } else {
                Color::WHITE
            };
            let label_color = if is_root || is_highlighted {
                Color::WHITE
            } else {
                Color::from_rgb8(0x33, 0x33, 0x33)
            };
            let label = match self.display_mode {
                DisplayMode::Notes => tone.to_string(),
                DisplayMode::Intervals => (degree + 1).to_string(),
            };

            for position in positions {
                let x = marker_x(position.fret, fret_spacing);
                let y = f32::from(position.string_number) * string_spacing;

                frame.fill(&Path::circle(Point::new(x, y), NOTE_MARKER_RADIUS), fill);
                frame.stroke(
                    &Path::circle(Point::new(x, y), NOTE_MARKER_RADIUS),
                    Stroke::default()
                        .with_width(2.0)
                        .with_color(Color::from_rgb8(0x33, 0x33, 0x33)),
                );
                frame.fill_text(Text {
                    content: label.clone(),
                    position: Point::new(x, y),
                    color: label_color,
                    size: 12.0.into(),
                    horizontal_alignment: alignment::Horizontal::Center,
                    vertical_alignment: alignment::Vertical::Center,
                    ..Text::default()
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: Size = Size {
        width: 360.0,
        height: 210.0,
    };

    #[test]
    fn cell_centers_map_back_to_their_cell() {
        let fret_spacing = CANVAS.width / 12.0;
        let string_spacing = CANVAS.height / 7.0;
        for string in 1..=6u8 {
            for fret in 0..=12u8 {
                let x = f32::from(fret) * fret_spacing;
                let y = f32::from(string) * string_spacing;
                assert_eq!(grid_position(x, y, CANVAS), Ok((string, fret)));
            }
        }
    }

    #[test]
    fn fret_thirteen_is_out_of_range() {
        let fret_spacing = CANVAS.width / 12.0;
        let string_spacing = CANVAS.height / 7.0;
        assert_eq!(
            grid_position(13.0 * fret_spacing, 3.0 * string_spacing, CANVAS),
            Err(TheoryError::OutOfRange)
        );
    }

    #[test]
    fn string_seven_is_out_of_range() {
        let fret_spacing = CANVAS.width / 12.0;
        let string_spacing = CANVAS.height / 7.0;
        assert_eq!(
            grid_position(5.0 * fret_spacing, 7.0 * string_spacing, CANVAS),
            Err(TheoryError::OutOfRange)
        );
    }

    #[test]
    fn string_zero_row_is_out_of_range() {
        // The top margin row rounds to string 0, which is not playable.
        assert_eq!(grid_position(50.0, 0.0, CANVAS), Err(TheoryError::OutOfRange));
    }

    #[test]
    fn open_string_markers_sit_left_of_the_nut() {
        let fret_spacing = CANVAS.width / 12.0;
        assert!(marker_x(0, fret_spacing) < fret_spacing * 0.5);
        assert_eq!(marker_x(0, fret_spacing), 0.3 * fret_spacing);
    }

    #[test]
    fn fretted_markers_are_centered_in_their_cell() {
        let fret_spacing = 30.0;
        assert_eq!(marker_x(1, fret_spacing), 0.5 * fret_spacing);
        assert_eq!(marker_x(12, fret_spacing), 11.5 * fret_spacing);
    }
}
