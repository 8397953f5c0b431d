use egui::{Pos2, Rect};

// Common constants for all element types
pub const DEFAULT_HIT_TOLERANCE: f32 = 10.0;
/// Approximate glyph advance of a text label, in multiples of its stroke width
pub const TEXT_CHAR_WIDTH_FACTOR: f32 = 4.0;
/// Font size of a text label, in multiples of its stroke width
pub const TEXT_HEIGHT_FACTOR: f32 = 8.0;

/// Calculate the bounding box for a set of points
pub(crate) fn calculate_bounds(points: &[Pos2], padding: f32) -> Rect {
    if points.is_empty() {
        return Rect::NOTHING;
    }

    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;

    for point in points {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }

    Rect::from_min_max(
        Pos2::new(min_x - padding, min_y - padding),
        Pos2::new(max_x + padding, max_y + padding),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_cover_all_points() {
        let rect = calculate_bounds(&[Pos2::new(5.0, 1.0), Pos2::new(-3.0, 9.0)], 1.0);
        assert_eq!(rect.min, Pos2::new(-4.0, 0.0));
        assert_eq!(rect.max, Pos2::new(6.0, 10.0));
    }

    #[test]
    fn test_bounds_of_nothing() {
        assert_eq!(calculate_bounds(&[], 2.0), Rect::NOTHING);
    }
}
