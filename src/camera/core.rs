use glam::{Mat4, Quat, Vec3};

/// Camera defined by a world-space pose and a projection.
///
/// The trackball controls mutate `position`, `up`, and `orientation` (via
/// `look_at`) and read/write the projection zoom; everything else is the
/// embedder's.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Camera position in world space.
    pub position: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Camera-to-world rotation.
    pub orientation: Quat,
    /// Projection parameters.
    pub projection: Projection,
}

/// Projection kind and parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Perspective frustum.
    Perspective(Perspective),
    /// Orthographic frustum.
    Orthographic(Orthographic),
    /// Raw matrix supplied by the embedder (e.g. a calibrated projector).
    ///
    /// The controls cannot reason about this kind: zoom is fixed at 1.0
    /// and distance clamping / re-orientation are skipped with a warning.
    External(Mat4),
}

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perspective {
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    /// Zoom factor dividing the half-fov tangent.
    pub zoom: f32,
}

impl Perspective {
    /// Perspective projection with zoom 1.0.
    #[must_use]
    pub fn new(fovy: f32, aspect: f32, znear: f32, zfar: f32) -> Self {
        Self {
            fovy,
            aspect,
            znear,
            zfar,
            zoom: 1.0,
        }
    }

    /// Build the projection matrix.
    ///
    /// perspective_rh already uses [0,1] depth range (wgpu/Vulkan
    /// convention).
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        let half_tan = (self.fovy.to_radians() * 0.5).tan() / self.zoom;
        Mat4::perspective_rh(
            2.0 * half_tan.atan(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }
}

/// Orthographic projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orthographic {
    /// Left frustum plane.
    pub left: f32,
    /// Right frustum plane.
    pub right: f32,
    /// Top frustum plane.
    pub top: f32,
    /// Bottom frustum plane.
    pub bottom: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    /// Zoom factor shrinking the frustum about its center.
    pub zoom: f32,
}

impl Orthographic {
    /// Orthographic projection with explicit planes and zoom 1.0.
    #[must_use]
    pub fn new(
        left: f32,
        right: f32,
        top: f32,
        bottom: f32,
        znear: f32,
        zfar: f32,
    ) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
            znear,
            zfar,
            zoom: 1.0,
        }
    }

    /// Symmetric frustum of the given width/height, centered on the axis.
    #[must_use]
    pub fn from_size(width: f32, height: f32, znear: f32, zfar: f32) -> Self {
        Self::new(
            -width * 0.5,
            width * 0.5,
            height * 0.5,
            -height * 0.5,
            znear,
            zfar,
        )
    }

    /// Build the projection matrix, honoring zoom about the frustum center.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        let dx = (self.right - self.left) / (2.0 * self.zoom);
        let dy = (self.top - self.bottom) / (2.0 * self.zoom);
        let cx = (self.right + self.left) * 0.5;
        let cy = (self.top + self.bottom) * 0.5;
        Mat4::orthographic_rh(
            cx - dx,
            cx + dx,
            cy - dy,
            cy + dy,
            self.znear,
            self.zfar,
        )
    }
}

impl Camera {
    /// Perspective camera at `position`, up +Y, identity orientation.
    #[must_use]
    pub fn perspective(position: Vec3, projection: Perspective) -> Self {
        Self {
            position,
            up: Vec3::Y,
            orientation: Quat::IDENTITY,
            projection: Projection::Perspective(projection),
        }
    }

    /// Orthographic camera at `position`, up +Y, identity orientation.
    #[must_use]
    pub fn orthographic(position: Vec3, projection: Orthographic) -> Self {
        Self {
            position,
            up: Vec3::Y,
            orientation: Quat::IDENTITY,
            projection: Projection::Orthographic(projection),
        }
    }

    /// Camera with an embedder-supplied projection matrix.
    #[must_use]
    pub fn external(position: Vec3, matrix: Mat4) -> Self {
        Self {
            position,
            up: Vec3::Y,
            orientation: Quat::IDENTITY,
            projection: Projection::External(matrix),
        }
    }

    /// Re-orient the camera to face `target`, respecting `up`.
    pub fn look_at(&mut self, target: Vec3) {
        let view = Mat4::look_at_rh(self.position, target, self.up);
        self.orientation = Quat::from_mat4(&view).inverse();
    }

    /// World-space forward direction (-Z of the camera frame).
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    /// World-to-view matrix derived from the current pose.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position)
            .inverse()
    }

    /// Build just the projection matrix.
    #[must_use]
    pub fn build_projection(&self) -> Mat4 {
        match self.projection {
            Projection::Perspective(p) => p.matrix(),
            Projection::Orthographic(o) => o.matrix(),
            Projection::External(m) => m,
        }
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        self.build_projection() * self.view_matrix()
    }

    /// Current projection zoom (1.0 for external projections).
    #[must_use]
    pub fn zoom(&self) -> f32 {
        match self.projection {
            Projection::Perspective(p) => p.zoom,
            Projection::Orthographic(o) => o.zoom,
            Projection::External(_) => 1.0,
        }
    }

    /// Set the projection zoom. Ignored, with a warning, for external
    /// projections.
    pub fn set_zoom(&mut self, zoom: f32) {
        match &mut self.projection {
            Projection::Perspective(p) => p.zoom = zoom,
            Projection::Orthographic(o) => o.zoom = zoom,
            Projection::External(_) => {
                log::warn!("external projection: zoom ignored");
            }
        }
    }

    /// Update the perspective aspect ratio. No effect on the other kinds.
    pub fn set_aspect(&mut self, aspect: f32) {
        if let Projection::Perspective(p) = &mut self.projection {
            p.aspect = aspect;
        }
    }

    /// Whether the projection is perspective.
    #[must_use]
    pub fn is_perspective(&self) -> bool {
        matches!(self.projection, Projection::Perspective(_))
    }

    /// Whether the projection is orthographic.
    #[must_use]
    pub fn is_orthographic(&self) -> bool {
        matches!(self.projection, Projection::Orthographic(_))
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the view-projection matrix and camera pose.
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Padding for GPU alignment.
    pub(crate) _pad0: f32,
    /// Camera forward direction for lighting.
    pub forward: [f32; 3],
    /// Padding for GPU alignment.
    pub(crate) _pad1: f32,
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a new camera uniform with identity view-projection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            _pad0: 0.0,
            forward: [0.0, 0.0, -1.0],
            _pad1: 0.0,
        }
    }

    /// Update uniform fields from the given camera's current state.
    pub fn update_view_proj(&mut self, camera: &Camera) {
        self.view_proj = camera.build_matrix().to_cols_array_2d();
        self.position = camera.position.to_array();
        self.forward = camera.forward().to_array();
    }
}
