use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke};

use crate::interaction::ViewTransform;

pub(super) const EDGE_COLOR: Color32 = Color32::from_rgb(138, 150, 163);
pub(super) const LABEL_COLOR: Color32 = Color32::from_gray(238);
pub(super) const RESOURCE_FILL: Color32 = Color32::from_rgb(43, 58, 74);
pub(super) const STACK_OUTLINE: Color32 = Color32::from_rgba_premultiplied(110, 130, 150, 160);
pub(super) const DRAGGED_OUTLINE: Color32 = Color32::from_rgb(245, 206, 93);

pub(super) fn draw_background(painter: &Painter, rect: Rect, transform: &ViewTransform) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(19, 23, 29));

    let step = (56.0 * transform.scale.clamp(0.6, 1.8)).max(20.0);
    let origin = rect.min + transform.translate;
    let stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 70));

    let mut x = rect.left() + (origin.x - rect.left()).rem_euclid(step);
    while x < rect.right() {
        painter.line_segment(
            [Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())],
            stroke,
        );
        x += step;
    }

    let mut y = rect.top() + (origin.y - rect.top()).rem_euclid(step);
    while y < rect.bottom() {
        painter.line_segment(
            [Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)],
            stroke,
        );
        y += step;
    }
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}
