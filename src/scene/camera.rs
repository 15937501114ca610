use glam::{Mat3, Mat4, Vec3, Vec4};

use crate::render::{FIELD_OF_VIEW, FRUSTRUM_FAR, FRUSTRUM_NEAR};

/// Converts the tool-supplied camera world matrix into the backend view
/// matrix.
///
/// The camera world matrix arrives in the tool's right-handed convention;
/// the rendering backend expects a left-handed view matrix. The conversion
/// transposes the 3x3 basis, carries the translation across and inverts the
/// result:
///
/// ```text
/// | 11 12 13 x |      | 11 21 31 0 |
/// | 21 22 23 y |      | 12 22 32 0 |
/// | 31 32 33 z |  ->  | 13 23 33 0 |
/// | 0  0  0  1 |      | x  y  z  1 |
/// ```
#[must_use]
pub fn view_matrix_from_camera_world(world: &Mat4) -> Mat4 {
    let basis = Mat3::from_mat4(*world).transpose();
    let mut converted = Mat4::from_mat3(basis);
    converted.w_axis = Vec4::new(world.w_axis.x, world.w_axis.y, world.w_axis.z, 1.0);
    converted.inverse()
}

/// Builds the fixed perspective projection for the window dimensions.
///
/// Near/far/FOV come from the engine constants; the projection is created
/// once at initialization and only rebuilt on resize.
#[must_use]
pub fn projection_matrix(width: u32, height: u32) -> Mat4 {
    Mat4::perspective_lh(
        FIELD_OF_VIEW.to_radians(),
        width as f32 / height.max(1) as f32,
        FRUSTRUM_NEAR,
        FRUSTRUM_FAR,
    )
}

/// Engine-side camera state derived from [`update`](Camera::update) calls.
///
/// Holds the converted view matrix, the world-space position and the world
/// basis vectors used for particle billboarding.
pub struct Camera {
    pub view: Mat4,
    pub projection: Mat4,
    pub position: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    /// Whether the view changed since the last frame; cleared by the engine
    /// after the scene constants have been re-sent.
    pub view_updated: bool,
}

impl Camera {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            view: Mat4::IDENTITY,
            projection: projection_matrix(width, height),
            position: Vec3::ZERO,
            right: Vec3::X,
            up: Vec3::Y,
            view_updated: true,
        }
    }

    /// Ingests a new camera world matrix from the application.
    pub fn update(&mut self, world: &Mat4) {
        self.view = view_matrix_from_camera_world(world);
        self.position = world.w_axis.truncate();
        self.right = world.x_axis.truncate().normalize_or_zero();
        self.up = world.y_axis.truncate().normalize_or_zero();
        self.view_updated = true;
    }

    #[must_use]
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}
