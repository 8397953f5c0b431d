use eframe_sketch::element::{factory, ShapeKind};
use eframe_sketch::geometry::{
    distance_point_to_segment, hit_test_resize_handle, is_inside_image, is_inside_shape,
    is_near_path, topmost_element_at,
};
use eframe_sketch::tools::resize_image_rect;
use eframe_sketch::widgets::ResizeHandle;
use egui::{Color32, Pos2, Rect, Vec2};

const EPS: f32 = 0.001;

fn pos(x: f32, y: f32) -> Pos2 {
    Pos2::new(x, y)
}

#[test]
fn test_distance_to_segment() {
    assert!((distance_point_to_segment(pos(0.0, 5.0), pos(0.0, 0.0), pos(10.0, 0.0)) - 5.0).abs() < EPS);
    assert!(distance_point_to_segment(pos(4.0, 0.0), pos(0.0, 0.0), pos(10.0, 0.0)).abs() < EPS);
    // Beyond the end the distance is measured to the endpoint
    assert!((distance_point_to_segment(pos(13.0, 4.0), pos(0.0, 0.0), pos(10.0, 0.0)) - 5.0).abs() < EPS);
}

#[test]
fn test_path_tolerance() {
    let path = factory::create_path_from_points(
        vec![pos(0.0, 0.0), pos(100.0, 0.0), pos(100.0, 100.0)],
        Color32::BLACK,
        2.0,
    );
    assert!(is_near_path(pos(50.0, 10.0), &path, 10.0));
    assert!(!is_near_path(pos(50.0, 10.5), &path, 10.0));
    assert!(is_near_path(pos(105.0, 50.0), &path, 10.0));
}

#[test]
fn test_shape_containment() {
    let rect = factory::create_shape_between(ShapeKind::Rectangle, pos(50.0, 50.0), pos(10.0, 10.0), Color32::RED, 2.0);
    assert!(is_inside_shape(pos(10.0, 10.0), &rect));
    assert!(is_inside_shape(pos(30.0, 30.0), &rect));
    assert!(!is_inside_shape(pos(51.0, 30.0), &rect));

    // Diagonal of 0,0 -> 60,80 is 100, so the radius is 50 around 30,40
    let circle = factory::create_shape_between(ShapeKind::Circle, pos(0.0, 0.0), pos(60.0, 80.0), Color32::RED, 2.0);
    assert!(is_inside_shape(pos(80.0, 40.0), &circle));
    assert!(!is_inside_shape(pos(81.0, 40.0), &circle));

    let arrow = factory::create_shape_between(ShapeKind::Arrow, pos(0.0, 0.0), pos(100.0, 0.0), Color32::RED, 2.0);
    assert!(is_inside_shape(pos(50.0, 10.0), &arrow));
    assert!(!is_inside_shape(pos(50.0, 11.0), &arrow));
}

#[test]
fn test_image_box_is_inclusive() {
    let image = factory::create_image(pos(10.0, 10.0), Vec2::new(20.0, 30.0), vec![0u8], Vec2::new(20.0, 30.0));
    assert!(is_inside_image(pos(10.0, 10.0), &image));
    assert!(is_inside_image(pos(30.0, 40.0), &image));
    assert!(!is_inside_image(pos(30.1, 40.0), &image));
}

#[test]
fn test_handle_hit_order() {
    let image = factory::create_image(pos(0.0, 0.0), Vec2::new(100.0, 50.0), vec![0u8], Vec2::new(100.0, 50.0));
    assert_eq!(hit_test_resize_handle(pos(1.0, 1.0), &image, 8.0), Some(ResizeHandle::Nw));
    assert_eq!(hit_test_resize_handle(pos(100.0, 50.0), &image, 8.0), Some(ResizeHandle::Se));
    assert_eq!(hit_test_resize_handle(pos(50.0, 52.0), &image, 8.0), Some(ResizeHandle::S));
    assert_eq!(hit_test_resize_handle(pos(103.0, 25.0), &image, 8.0), Some(ResizeHandle::E));
    assert_eq!(hit_test_resize_handle(pos(50.0, 25.0), &image, 8.0), None);
}

#[test]
fn test_topmost_wins() {
    let below = factory::create_shape_between(ShapeKind::Rectangle, pos(0.0, 0.0), pos(100.0, 100.0), Color32::RED, 2.0);
    let above = factory::create_shape_between(ShapeKind::Rectangle, pos(40.0, 40.0), pos(60.0, 60.0), Color32::BLUE, 2.0);
    let elements = vec![below.into(), above.into()];
    assert_eq!(topmost_element_at(pos(50.0, 50.0), &elements, 10.0), Some(1));
    assert_eq!(topmost_element_at(pos(10.0, 10.0), &elements, 10.0), Some(0));
    assert_eq!(topmost_element_at(pos(200.0, 200.0), &elements, 10.0), None);
}

#[test]
fn test_every_handle_keeps_aspect_ratio() {
    let rect = Rect::from_min_size(pos(100.0, 100.0), Vec2::new(160.0, 90.0));
    let ratio = 16.0 / 9.0;
    let pointers = [pos(0.0, 0.0), pos(500.0, 400.0), pos(170.0, 140.0), pos(90.0, 300.0)];

    for handle in ResizeHandle::HIT_ORDER {
        for pointer in pointers {
            let resized = resize_image_rect(rect, handle, pointer, ratio, 20.0);
            assert!(
                (resized.width() / resized.height() - ratio).abs() < EPS,
                "{:?} to {:?} gave {:?}",
                handle,
                pointer,
                resized
            );
            assert!(resized.width() >= 20.0 - EPS);
            assert!(resized.height() >= 20.0 - EPS);
        }
    }
}

#[test]
fn test_opposite_corner_stays_fixed() {
    let rect = Rect::from_min_size(pos(100.0, 100.0), Vec2::new(200.0, 100.0));
    let resized = resize_image_rect(rect, ResizeHandle::Ne, pos(400.0, 0.0), 2.0, 20.0);
    assert!((resized.min.x - 100.0).abs() < EPS);
    assert!((resized.max.y - 200.0).abs() < EPS);
    assert!((resized.width() - 300.0).abs() < EPS);
    assert!((resized.height() - 150.0).abs() < EPS);
}
