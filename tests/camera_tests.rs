//! Camera, Frustum and View-Projection Tests
//!
//! Tests for:
//! - Perspective/Orthographic projection matrix generation
//! - Culling parameter availability
//! - Frustum plane extraction (Gribb-Hartmann)
//! - Frustum-sphere intersection
//! - GPU view-projection and its inverse

use glam::{Affine3A, Mat4, Vec3, Vec4};

use toy_rp::renderer::{ViewProjection, gpu_projection};
use toy_rp::{Camera, ClipConvention, Frustum};

const EPSILON: f32 = 1e-4;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn assert_identity(m: Mat4) {
    let expected = Mat4::IDENTITY;
    for i in 0..4 {
        for j in 0..4 {
            assert!(
                approx(m.col(i)[j], expected.col(i)[j]),
                "expected identity at [{i}][{j}]: {} vs {}",
                m.col(i)[j],
                expected.col(i)[j]
            );
        }
    }
}

// ============================================================================
// Projection Matrix Tests
// ============================================================================

#[test]
fn perspective_projection_is_opengl_convention() {
    let cam = Camera::new_perspective(60.0, 1.0, 0.1, 100.0);

    let near = cam.projection_matrix() * Vec4::new(0.0, 0.0, -0.1, 1.0);
    let far = cam.projection_matrix() * Vec4::new(0.0, 0.0, -100.0, 1.0);
    assert!(approx(near.z / near.w, -1.0), "near should map to -1, got {}", near.z / near.w);
    assert!(approx(far.z / far.w, 1.0), "far should map to 1, got {}", far.z / far.w);
}

#[test]
fn perspective_aspect_ratio_affects_fov() {
    let wide = Camera::new_perspective(60.0, 2.0, 0.1, 100.0);
    let square = Camera::new_perspective(60.0, 1.0, 0.1, 100.0);

    assert_ne!(
        wide.projection_matrix().x_axis.x,
        square.projection_matrix().x_axis.x,
        "Different aspect ratios should produce different X scaling"
    );
}

// ============================================================================
// View Matrix Tests
// ============================================================================

#[test]
fn view_matrix_is_inverse_of_world() {
    let mut cam = Camera::new_perspective(60.0, 1.0, 0.1, 100.0);
    let world = Affine3A::from_translation(Vec3::new(1.0, 2.0, 3.0));
    cam.update_view(&world);

    assert_identity(Mat4::from(world) * cam.world_to_camera_matrix());
    assert!(approx(cam.position().y, 2.0));
}

#[test]
fn from_matrices_keeps_host_matrices() {
    let proj = Mat4::perspective_rh_gl(1.2, 1.5, 0.3, 50.0);
    let view = Mat4::look_at_rh(Vec3::new(0.0, 3.0, 8.0), Vec3::ZERO, Vec3::Y);
    let cam = Camera::from_matrices("Host", proj, view);

    assert_eq!(cam.projection_matrix(), proj);
    assert_eq!(cam.world_to_camera_matrix(), view);
    assert!((cam.position() - Vec3::new(0.0, 3.0, 8.0)).length() < EPSILON);
}

// ============================================================================
// Culling Parameter Tests
// ============================================================================

#[test]
fn valid_camera_produces_culling_parameters() {
    let mut cam = Camera::new_perspective(60.0, 1.0, 0.1, 100.0);
    cam.update_view(&Affine3A::from_translation(Vec3::new(0.0, 0.0, 5.0)));

    let params = cam.culling_parameters().expect("camera is renderable");
    assert_eq!(params.view_projection, cam.projection_matrix() * cam.world_to_camera_matrix());
    assert!(approx(params.camera_position.z, 5.0));
}

#[test]
fn zero_near_far_range_is_not_renderable() {
    let cam = Camera::new_perspective(60.0, 1.0, 1.0, 1.0);
    assert!(cam.culling_parameters().is_none());
}

#[test]
fn zero_aspect_is_not_renderable() {
    let cam = Camera::new_orthographic(5.0, 0.0, 0.1, 10.0);
    assert!(cam.culling_parameters().is_none());
}

#[test]
fn wide_orthographic_camera_is_renderable() {
    let cam = Camera::new_orthographic(10_000.0, 1.0, 0.1, 100_000.0);
    let params = cam.culling_parameters().expect("large ortho view is renderable");
    assert!(params.frustum.intersects_sphere(Vec3::new(5_000.0, 0.0, -50_000.0), 1.0));
    assert!(!params.frustum.intersects_sphere(Vec3::new(20_000.0, 0.0, -50_000.0), 1.0));
}

#[test]
fn huge_orthographic_camera_is_renderable() {
    let cam = Camera::new_orthographic(1.0e7, 1.0, 0.1, 1.0e5);
    assert!(cam.culling_parameters().is_some());
}

#[test]
fn camera_under_scaled_parent_is_renderable() {
    let mut cam = Camera::new_orthographic(100.0, 1.0, 0.1, 1_000.0);
    cam.update_view(&Affine3A::from_scale(Vec3::splat(100.0)));

    let params = cam.culling_parameters().expect("scaled view is renderable");
    // View shrinks the world by 100, so the visible half-width is 10 000 units.
    assert!(params.frustum.intersects_sphere(Vec3::new(9_000.0, 0.0, -5_000.0), 1.0));
    assert!(!params.frustum.intersects_sphere(Vec3::new(12_000.0, 0.0, -5_000.0), 1.0));
}

#[test]
fn wide_orthographic_camera_is_rendered_by_pipeline() {
    use toy_rp::headless::HeadlessContext;
    use toy_rp::{CameraOutcome, Extent, PipelineAsset};

    let mut host = HeadlessContext::new();
    let mut pipeline = PipelineAsset::default()
        .create_pipeline(&mut host, Extent::new(64, 64))
        .unwrap();
    let report = pipeline
        .render(&mut host, &[Camera::new_orthographic(10_000.0, 1.0, 0.1, 100_000.0)])
        .unwrap();
    assert_eq!(report.outcomes(), [CameraOutcome::Rendered]);
}

// ============================================================================
// Frustum Extraction and Intersection Tests
// ============================================================================

fn make_test_frustum() -> Frustum {
    // Standard perspective camera at origin looking down -Z
    let proj = Mat4::perspective_rh_gl(60.0_f32.to_radians(), 1.0, 0.1, 100.0);
    Frustum::from_matrix(proj).expect("valid projection")
}

#[test]
fn frustum_planes_are_normalized() {
    let frustum = make_test_frustum();
    for plane in frustum.planes() {
        assert!(approx(plane.truncate().length(), 1.0));
    }
}

#[test]
fn frustum_sphere_inside() {
    let frustum = make_test_frustum();
    assert!(frustum.intersects_sphere(Vec3::new(0.0, 0.0, -5.0), 1.0));
}

#[test]
fn frustum_sphere_outside_left() {
    let frustum = make_test_frustum();
    assert!(!frustum.intersects_sphere(Vec3::new(-1000.0, 0.0, -5.0), 1.0));
}

#[test]
fn frustum_sphere_outside_behind() {
    let frustum = make_test_frustum();
    assert!(!frustum.intersects_sphere(Vec3::new(0.0, 0.0, 10.0), 1.0));
}

#[test]
fn frustum_sphere_beyond_far_plane() {
    let frustum = make_test_frustum();
    assert!(!frustum.intersects_sphere(Vec3::new(0.0, 0.0, -200.0), 1.0));
}

#[test]
fn frustum_sphere_straddling_near_plane() {
    let frustum = make_test_frustum();
    assert!(frustum.intersects_sphere(Vec3::new(0.0, 0.0, 0.5), 1.0));
}

#[test]
fn degenerate_matrix_has_no_frustum() {
    assert!(Frustum::from_matrix(Mat4::ZERO).is_none());
}

// ============================================================================
// View-Projection Uniform Tests
// ============================================================================

#[test]
fn vp_matrix_is_gpu_projection_times_view() {
    let mut cam = Camera::new_perspective(75.0, 16.0 / 9.0, 0.3, 500.0);
    cam.update_view(&Affine3A::from_rotation_translation(
        glam::Quat::from_rotation_y(0.7),
        Vec3::new(4.0, 1.5, -2.0),
    ));

    for convention in [ClipConvention::OpenGl, ClipConvention::ZeroToOne, ClipConvention::ReversedZ] {
        let vp = ViewProjection::new(&cam, convention);
        let expected = gpu_projection(cam.projection_matrix(), convention) * cam.world_to_camera_matrix();
        assert_eq!(vp.vp_matrix, expected);
        assert_identity(vp.vp_matrix * vp.vp_matrix_inv);
    }
}

#[test]
fn inverse_reconstructs_world_position_from_depth() {
    let mut cam = Camera::new_perspective(60.0, 1.0, 0.1, 100.0);
    cam.update_view(&Affine3A::from_translation(Vec3::new(0.0, 2.0, 10.0)));
    let vp = ViewProjection::new(&cam, ClipConvention::ZeroToOne);

    let world = Vec3::new(0.5, 1.0, -3.0);
    let clip = vp.vp_matrix * world.extend(1.0);
    let ndc = clip / clip.w;
    assert!((0.0..=1.0).contains(&ndc.z));

    let back = vp.vp_matrix_inv * ndc;
    let reconstructed = back.truncate() / back.w;
    assert!((reconstructed - world).length() < 1e-3, "got {reconstructed}");
}
