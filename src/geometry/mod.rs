pub mod hit_testing;

pub use hit_testing::{
    distance_point_to_segment, element_contains, handle_anchors, hit_test_resize_handle,
    is_inside_image, is_inside_shape, is_near_path, topmost_element_at, topmost_image_at,
};
