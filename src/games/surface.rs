use ratatui::prelude::*;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Context, Line as CanvasLine};
use ratatui::widgets::Block;

use crate::games::geometry::{Aabb, Vec2};

pub const BACKGROUND: Color = Color::Rgb(26, 26, 46);

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Rect { bounds: Aabb, color: Color, filled: bool },
    Circle { center: Vec2, radius: f32, color: Color },
}

/// Retained display list in an engine's fixed logical pixel space.
///
/// Engines redraw into it at the end of every tick; the UI paints whatever
/// the last tick left behind, scaled onto the terminal.
#[derive(Clone, Debug)]
pub struct Surface {
    width: f32,
    height: f32,
    background: Color,
    shapes: Vec<Shape>,
}

impl Surface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            background: BACKGROUND,
            shapes: Vec::new(),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn clear(&mut self, color: Color) {
        self.background = color;
        self.shapes.clear();
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.shapes.push(Shape::Rect {
            bounds: Aabb::new(x, y, width, height),
            color,
            filled: true,
        });
    }

    pub fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.shapes.push(Shape::Rect {
            bounds: Aabb::new(x, y, width, height),
            color,
            filled: false,
        });
    }

    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        self.shapes.push(Shape::Circle {
            center: Vec2::new(cx, cy),
            radius,
            color,
        });
    }

    #[cfg(test)]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn is_blank(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Paint the display list into `area`, stretching the logical space to fit.
    pub fn paint(&self, frame: &mut Frame, area: Rect, block: Block) {
        let inner = block.inner(area);
        // One Braille dot is half a cell wide and a quarter cell tall.
        let step = (self.height / (inner.height.max(1) as f32 * 4.0)).max(0.5);
        let height = self.height;
        let canvas = Canvas::default()
            .block(block)
            .marker(Marker::Braille)
            .background_color(self.background)
            .x_bounds([0.0, self.width as f64])
            .y_bounds([0.0, self.height as f64])
            .paint(move |ctx| {
                for shape in &self.shapes {
                    draw_shape(ctx, shape, height, step);
                }
            });
        frame.render_widget(canvas, area);
    }
}

fn draw_shape(ctx: &mut Context, shape: &Shape, height: f32, step: f32) {
    // Canvas y grows upward.
    let flip = |y: f32| (height - y) as f64;
    match *shape {
        Shape::Rect { bounds, color, filled: true } => {
            let mut y = bounds.y;
            while y <= bounds.bottom() {
                ctx.draw(&CanvasLine::new(bounds.x as f64, flip(y), bounds.right() as f64, flip(y), color));
                y += step;
            }
        }
        Shape::Rect { bounds, color, filled: false } => {
            let (l, r) = (bounds.x as f64, bounds.right() as f64);
            let (t, b) = (flip(bounds.y), flip(bounds.bottom()));
            ctx.draw(&CanvasLine::new(l, t, r, t, color));
            ctx.draw(&CanvasLine::new(l, b, r, b, color));
            ctx.draw(&CanvasLine::new(l, t, l, b, color));
            ctx.draw(&CanvasLine::new(r, t, r, b, color));
        }
        Shape::Circle { center, radius, color } => {
            let mut dy = -radius;
            while dy <= radius {
                let half = (radius * radius - dy * dy).max(0.0).sqrt();
                let y = flip(center.y + dy);
                ctx.draw(&CanvasLine::new(
                    (center.x - half) as f64,
                    y,
                    (center.x + half) as f64,
                    y,
                    color,
                ));
                dy += step;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn clear_drops_previous_frame() {
        let mut s = Surface::new(400.0, 300.0);
        s.fill_rect(0.0, 290.0, 400.0, 2.0, Color::Gray);
        s.fill_circle(10.0, 10.0, 8.0, Color::Yellow);
        assert_eq!(s.shapes().len(), 2);

        s.clear(BACKGROUND);
        assert!(s.is_blank());
    }

    #[test]
    fn paints_into_a_small_terminal() {
        let mut s = Surface::new(500.0, 500.0);
        s.fill_rect(240.0, 240.0, 18.0, 18.0, Color::Green);
        s.stroke_rect(10.0, 30.0, 45.0, 20.0, Color::Red);
        s.fill_circle(370.0, 370.0, 8.0, Color::Yellow);

        let mut terminal = Terminal::new(TestBackend::new(40, 20)).unwrap();
        terminal
            .draw(|frame| s.paint(frame, frame.area(), Block::bordered()))
            .unwrap();
    }
}
