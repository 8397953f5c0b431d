//! Pure hit-testing geometry used by the eraser and the select tool.
//!
//! Every function here is deterministic and side-effect free.

use egui::Pos2;

use crate::element::{
    DrawingElement, DrawingPath, Element, ImageElement, Shape, ShapeKind, DEFAULT_HIT_TOLERANCE,
};
use crate::widgets::ResizeHandle;

/// Distance from `point` to the segment `start..end`.
///
/// The projection parameter is clamped to `[0, 1]`, so points beyond either
/// end measure the distance to that endpoint.
pub fn distance_point_to_segment(point: Pos2, start: Pos2, end: Pos2) -> f32 {
    let segment = end - start;
    let to_point = point - start;

    let len_sq = segment.length_sq();
    if len_sq == 0.0 {
        return to_point.length();
    }

    let t = (to_point.dot(segment) / len_sq).clamp(0.0, 1.0);
    let foot = start + segment * t;
    point.distance(foot)
}

/// True if `point` lies within `tolerance` of any segment of the path.
/// Paths with fewer than two points never match.
pub fn is_near_path(point: Pos2, path: &DrawingPath, tolerance: f32) -> bool {
    path.points()
        .windows(2)
        .any(|pair| distance_point_to_segment(point, pair[0], pair[1]) <= tolerance)
}

/// Shape containment using the default arrow tolerance
pub fn is_inside_shape(point: Pos2, shape: &Shape) -> bool {
    shape_contains(point, shape, DEFAULT_HIT_TOLERANCE)
}

pub(crate) fn shape_contains(point: Pos2, shape: &Shape, arrow_tolerance: f32) -> bool {
    match shape.kind() {
        ShapeKind::Rectangle => shape.bounds().contains(point),
        ShapeKind::Circle => point.distance(shape.center()) <= shape.radius(),
        ShapeKind::Arrow => {
            distance_point_to_segment(point, shape.start(), shape.end()) <= arrow_tolerance
        }
        ShapeKind::Text => shape.text_bounds().contains(point),
    }
}

/// Inclusive box containment over `[position, position + size]`
pub fn is_inside_image(point: Pos2, image: &ImageElement) -> bool {
    image.rect().contains(point)
}

/// Hit test any element, the way the eraser does
pub fn element_contains(point: Pos2, element: &DrawingElement, tolerance: f32) -> bool {
    match element {
        DrawingElement::Path(path) => is_near_path(point, path, tolerance),
        DrawingElement::Shape(shape) => shape_contains(point, shape, tolerance),
        DrawingElement::Image(image) => is_inside_image(point, image),
    }
}

/// Index of the top-most element (last in paint order) hit at `point`
pub fn topmost_element_at(
    point: Pos2,
    elements: &[DrawingElement],
    tolerance: f32,
) -> Option<usize> {
    elements
        .iter()
        .rposition(|element| element_contains(point, element, tolerance))
}

/// Index of the top-most image whose box contains `point`
pub fn topmost_image_at(point: Pos2, elements: &[DrawingElement]) -> Option<usize> {
    elements.iter().rposition(|element| {
        element
            .as_image()
            .is_some_and(|image| is_inside_image(point, image))
    })
}

/// The eight handle anchors of an image, in hit-test order
pub fn handle_anchors(image: &ImageElement) -> [(ResizeHandle, Pos2); 8] {
    let rect = image.rect();
    ResizeHandle::HIT_ORDER.map(|handle| (handle, handle.anchor(rect)))
}

/// First handle (in [`ResizeHandle::HIT_ORDER`]) whose square contains `point`
pub fn hit_test_resize_handle(
    point: Pos2,
    image: &ImageElement,
    handle_size: f32,
) -> Option<ResizeHandle> {
    let rect = image.rect();
    ResizeHandle::HIT_ORDER
        .into_iter()
        .find(|handle| handle.handle_rect(rect, handle_size).contains(point))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::factory;
    use egui::{Color32, Vec2};

    fn pos(x: f32, y: f32) -> Pos2 {
        Pos2::new(x, y)
    }

    #[test]
    fn test_zero_length_segment() {
        assert_eq!(distance_point_to_segment(pos(3.0, 4.0), pos(0.0, 0.0), pos(0.0, 0.0)), 5.0);
    }

    #[test]
    fn test_single_point_path_never_matches() {
        let path = factory::create_path(pos(0.0, 0.0), Color32::BLACK, 2.0);
        assert!(!is_near_path(pos(0.0, 0.0), &path, 10.0));
    }

    #[test]
    fn test_text_box_sits_above_anchor() {
        let label = factory::create_text(pos(100.0, 100.0), "abcd", Color32::BLACK, 2.0).unwrap();
        // 2 * 4 * 4 = 32 wide, 2 * 8 = 16 tall
        assert!(is_inside_shape(pos(110.0, 90.0), &label));
        assert!(is_inside_shape(pos(132.0, 84.0), &label));
        assert!(!is_inside_shape(pos(110.0, 101.0), &label));
        assert!(!is_inside_shape(pos(133.0, 90.0), &label));
    }

    #[test]
    fn test_corner_handles_win_over_edges() {
        let image = factory::create_image(
            pos(0.0, 0.0),
            Vec2::new(10.0, 10.0),
            vec![0u8; 4],
            Vec2::new(10.0, 10.0),
        );
        // With a 10x10 box and 8 unit handles, the nw and n squares overlap
        assert_eq!(hit_test_resize_handle(pos(2.0, 0.0), &image, 8.0), Some(ResizeHandle::Nw));
        assert_eq!(hit_test_resize_handle(pos(5.0, 5.0), &image, 8.0), None);
    }
}
