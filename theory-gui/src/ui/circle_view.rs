//! # Circle of Fifths Widget
//!
//! This module provides the interactive circle-of-fifths canvas. The
//! twelve major keys are laid out on a ring by their catalog angles,
//! and clicking a key node selects it.
//!
//! ## Features
//! - Ring layout from the catalog's 30-degree angle steps
//! - Selected key drawn with inverted colors
//! - Hit circles retained per pass for pointer hit-testing
//! - Click-to-select with first-match-in-catalog-order precedence

use iced::widget::canvas::{self, event, Event, Geometry, Path, Stroke, Text};
use iced::widget::container;
use iced::widget::text::Shaping;
use iced::{alignment, mouse, Color, Element, Length, Point, Rectangle, Renderer, Size, Theme};
use theory_core::catalog::{Key, CIRCLE_OF_FIFTHS};

/// Hit radius of a key node. The same constant is used when drawing
/// and when hit-testing, which keeps the two consistent.
const KEY_NODE_RADIUS: f32 = 25.0;
/// Margin between the ring and the canvas edge.
const RING_MARGIN: f32 = 40.0;

/// A drawn key node, retained so pointer input can be tested against
/// exactly what was put on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyNode {
    pub center: Point,
    pub radius: f32,
    pub key_index: usize,
}

/// Hit circles captured on the last pass over the canvas.
#[derive(Debug, Default)]
pub struct HitRegions {
    nodes: Vec<KeyNode>,
}

/// Computes the node positions for the given canvas size.
///
/// Each key's catalog angle is rotated so 0 degrees points up, then
/// the node center is placed at 85% of the ring radius.
pub fn layout_nodes(size: Size) -> Vec<KeyNode> {
    let cx = size.width / 2.0;
    let cy = size.height / 2.0;
    let radius = ring_radius(size);

    CIRCLE_OF_FIFTHS
        .iter()
        .enumerate()
        .map(|(i, key)| {
            let angle = (key.angle_degrees as f32 - 90.0).to_radians();
            KeyNode {
                center: Point::new(
                    cx + radius * 0.85 * angle.cos(),
                    cy + radius * 0.85 * angle.sin(),
                ),
                radius: KEY_NODE_RADIUS,
                key_index: i,
            }
        })
        .collect()
}

fn ring_radius(size: Size) -> f32 {
    (size.width.min(size.height) - RING_MARGIN) * 0.4
}

/// First node in catalog order whose center is within hit distance of
/// `point`. `None` is a no-op for the caller, not an error.
pub fn hit_test(nodes: &[KeyNode], point: Point) -> Option<usize> {
    nodes
        .iter()
        .find(|node| {
            let dx = point.x - node.center.x;
            let dy = point.y - node.center.y;
            (dx * dx + dy * dy).sqrt() <= node.radius
        })
        .map(|node| node.key_index)
}

/// Interactive circle-of-fifths widget.
#[derive(Debug, Clone)]
pub struct CircleOfFifths {
    /// The currently selected key, drawn inverted.
    selected: Option<&'static Key>,
}

impl CircleOfFifths {
    pub fn new(selected: Option<&'static Key>) -> Self {
        Self { selected }
    }

    pub fn view(self) -> Element<'static, crate::Message> {
        container(
            canvas::Canvas::new(self)
                .width(Length::Fill)
                .height(Length::Fixed(340.0)),
        )
        .into()
    }
}

impl canvas::Program<crate::Message> for CircleOfFifths {
    type State = HitRegions;

    fn update(
        &self,
        state: &mut Self::State,
        event: Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> (event::Status, Option<crate::Message>) {
        // Refresh the stored hit circles so they track the current
        // bounds before any test runs against them.
        state.nodes = layout_nodes(bounds.size());

        if let Some(position) = cursor.position_in(bounds) {
            if let Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) = event {
                if let Some(index) = hit_test(&state.nodes, position) {
                    return (
                        event::Status::Captured,
                        Some(crate::Message::CircleKeySelected(index)),
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
        theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        let palette = theme.palette();

        let center = Point::new(bounds.width / 2.0, bounds.height / 2.0);
        let radius = ring_radius(bounds.size());

        // Outer and inner rings
        frame.fill(&Path::circle(center, radius), palette.background);
        frame.stroke(
            &Path::circle(center, radius),
            Stroke::default()
                .with_width(2.0)
                .with_color(Color::from_rgb8(0xE0, 0xE0, 0xE0)),
        );
        frame.stroke(
            &Path::circle(center, radius * 0.7),
            Stroke::default()
                .with_width(1.0)
                .with_color(Color::from_rgb8(0xF0, 0xF0, 0xF0)),
        );

        // Key nodes
        for node in layout_nodes(bounds.size()) {
            let key = &CIRCLE_OF_FIFTHS[node.key_index];
            let is_selected = self.selected.is_some_and(|s| s.name == key.name);

            let (fill, outline, label) = if is_selected {
                (
                    Color::from_rgb8(0x1A, 0x1A, 0x1A),
                    Color::from_rgb8(0x1A, 0x1A, 0x1A),
                    Color::WHITE,
                )
            } else {
                (
                    Color::WHITE,
                    Color::from_rgb8(0xCC, 0xCC, 0xCC),
                    Color::from_rgb8(0x1A, 0x1A, 0x1A),
                )
            };

            frame.fill(&Path::circle(node.center, node.radius), fill);
            frame.stroke(
                &Path::circle(node.center, node.radius),
                Stroke::default().with_width(2.0).with_color(outline),
            );

            frame.fill_text(Text {
                content: key.root_note.to_string(),
                position: Point::new(node.center.x, node.center.y - 5.0),
                color: label,
                size: 14.0.into(),
                horizontal_alignment: alignment::Horizontal::Center,
                vertical_alignment: alignment::Vertical::Center,
                ..Text::default()
            });
            frame.fill_text(Text {
                content: "大调".to_string(),
                position: Point::new(node.center.x, node.center.y + 8.0),
                color: if is_selected {
                    Color::from_rgb8(0xCC, 0xCC, 0xCC)
                } else {
                    Color::from_rgb8(0x66, 0x66, 0x66)
                },
                size: 10.0.into(),
                horizontal_alignment: alignment::Horizontal::Center,
                vertical_alignment: alignment::Vertical::Center,
                // CJK glyphs need advanced shaping
                shaping: Shaping::Advanced,
                ..Text::default()
            });
        }

        // Centered title
        frame.fill_text(Text {
            content: "五度圈".to_string(),
            position: Point::new(center.x, center.y - 5.0),
            color: palette.text,
            size: 16.0.into(),
            horizontal_alignment: alignment::Horizontal::Center,
            vertical_alignment: alignment::Vertical::Center,
            shaping: Shaping::Advanced,
            ..Text::default()
        });
        frame.fill_text(Text {
            content: "Circle of Fifths".to_string(),
            position: Point::new(center.x, center.y + 10.0),
            color: Color::from_rgb8(0x66, 0x66, 0x66),
            size: 12.0.into(),
            horizontal_alignment: alignment::Horizontal::Center,
            vertical_alignment: alignment::Vertical::Center,
            ..Text::default()
        });

        vec![frame.into_geometry()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: Size = Size {
        width: 340.0,
        height: 340.0,
    };

    #[test]
    fn twelve_nodes_in_catalog_order() {
        let nodes = layout_nodes(CANVAS);
        assert_eq!(nodes.len(), 12);
        for (i, node) in nodes.iter().enumerate() {
            assert_eq!(node.key_index, i);
            assert_eq!(node.radius, KEY_NODE_RADIUS);
        }
    }

    #[test]
    fn first_node_points_straight_up() {
        // C major sits at angle 0, which the layout rotates to the top.
        let nodes = layout_nodes(CANVAS);
        let c = &nodes[0];
        assert!((c.center.x - CANVAS.width / 2.0).abs() < 0.001);
        assert!(c.center.y < CANVAS.height / 2.0);
    }

    #[test]
    fn node_center_always_hits_its_own_node() {
        let nodes = layout_nodes(CANVAS);
        for node in &nodes {
            assert_eq!(hit_test(&nodes, node.center), Some(node.key_index));
        }
    }

    #[test]
    fn point_just_outside_the_radius_misses() {
        let nodes = layout_nodes(CANVAS);
        let node = &nodes[3];
        let outside = Point::new(node.center.x + node.radius + 1.0, node.center.y);
        assert_ne!(hit_test(&nodes, outside), Some(node.key_index));
    }

    #[test]
    fn far_away_point_is_a_miss() {
        let nodes = layout_nodes(CANVAS);
        assert_eq!(hit_test(&nodes, Point::new(-100.0, -100.0)), None);
    }

    #[test]
    fn overlapping_nodes_resolve_to_catalog_order() {
        let stacked = vec![
            KeyNode {
                center: Point::new(50.0, 50.0),
                radius: 25.0,
                key_index: 4,
            },
            KeyNode {
                center: Point::new(55.0, 50.0),
                radius: 25.0,
                key_index: 7,
            },
        ];
        assert_eq!(hit_test(&stacked, Point::new(52.0, 50.0)), Some(4));
    }
}
