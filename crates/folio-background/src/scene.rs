//! Scene graph for the point-cloud background: camera, material and cloud.

use std::sync::Arc;

use folio_core::{CellSize, Viewport};
use glam::{Mat4, Quat, Vec2, Vec3};
use rand::Rng;

use crate::mount::SurfaceId;
use crate::raster::{GraphicsLibrary, Renderer};

/// Number of particles in the cloud.
pub const POINT_COUNT: usize = 5000;

/// Edge length of the cube the particles are spread over.
pub const POINT_SPREAD: f32 = 800.0;

/// Vertical field of view in degrees.
pub const FOV_DEGREES: f32 = 75.0;

pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 1000.0;

/// Initial distance of the camera along the view axis.
pub const CAMERA_DISTANCE: f32 = 300.0;

/// Rotation speed of the cloud around X and Y, per millisecond scaled by 1e-4.
pub const ROTATION_SPEED: Vec2 = Vec2::new(0.2, 0.4);

/// Per-frame weight of the camera's chase toward the pointer.
pub const SMOOTHING: f32 = 0.05;

/// Default accent of the particles.
pub const DEFAULT_POINT_COLOR: (u8, u8, u8) = (0x93, 0x33, 0xea);

/// How overlapping points combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blending {
    Normal,
    Additive,
}

/// Appearance shared by every point of a cloud.
#[derive(Debug, Clone, PartialEq)]
pub struct PointsMaterial {
    pub color: (u8, u8, u8),
    pub size: f32,
    pub opacity: f32,
    pub transparent: bool,
    pub blending: Blending,
}

impl PointsMaterial {
    /// Default material tinted with `color`.
    pub fn with_color(color: (u8, u8, u8)) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }
}

impl Default for PointsMaterial {
    fn default() -> Self {
        Self {
            color: DEFAULT_POINT_COLOR,
            size: 1.5,
            opacity: 0.7,
            transparent: true,
            blending: Blending::Additive,
        }
    }
}

/// Particles with fixed positions and a time-driven rotation.
#[derive(Debug, Clone)]
pub struct PointCloud {
    positions: Box<[f32]>,
    material: PointsMaterial,
    /// Rotation around the X and Y axes in radians.
    pub rotation: Vec2,
}

impl PointCloud {
    /// Sample [`POINT_COUNT`] points uniformly from the spread cube.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, material: PointsMaterial) -> Self {
        let positions: Vec<f32> = (0..POINT_COUNT * 3)
            .map(|_| (rng.random::<f32>() - 0.5) * POINT_SPREAD)
            .collect();
        Self::from_positions(positions, material)
    }

    /// Build from a flat `[x, y, z, x, y, z, ...]` buffer.
    pub fn from_positions(positions: Vec<f32>, material: PointsMaterial) -> Self {
        Self {
            positions: positions.into_boxed_slice(),
            material,
            rotation: Vec2::ZERO,
        }
    }

    /// Flat position buffer.
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.len() < 3
    }

    pub fn material(&self) -> &PointsMaterial {
        &self.material
    }

    /// Points in model space.
    pub fn iter_points(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.positions
            .chunks_exact(3)
            .map(|p| Vec3::new(p[0], p[1], p[2]))
    }

    /// Model rotation (X then Y).
    pub fn model_rotation(&self) -> Quat {
        Quat::from_rotation_x(self.rotation.x) * Quat::from_rotation_y(self.rotation.y)
    }
}

/// Perspective camera that keeps its matrices in sync with its parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    aspect: f32,
    projection: Mat4,
    view: Mat4,
}

impl PerspectiveCamera {
    pub fn new(aspect: f32) -> Self {
        let mut camera = Self {
            fov: FOV_DEGREES,
            near: NEAR_PLANE,
            far: FAR_PLANE,
            position: Vec3::new(0.0, 0.0, CAMERA_DISTANCE),
            aspect,
            projection: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera.look_at(Vec3::ZERO);
        camera
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Change the aspect ratio and rebuild the projection.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_projection_matrix();
    }

    pub fn update_projection_matrix(&mut self) {
        self.projection =
            Mat4::perspective_rh_gl(self.fov.to_radians(), self.aspect, self.near, self.far);
    }

    /// Point the camera at `target` from its current position.
    pub fn look_at(&mut self, target: Vec3) {
        self.view = Mat4::look_at_rh(self.position, target, Vec3::Y);
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }
}

/// Everything one session draws: origin, camera, renderer and cloud.
#[derive(Debug)]
pub struct SceneHandle {
    origin: Vec3,
    camera: PerspectiveCamera,
    renderer: Renderer,
    points: PointCloud,
    surface: SurfaceId,
}

impl SceneHandle {
    /// Build a scene for a viewport, drawing into `surface`.
    pub fn build<R: Rng + ?Sized>(
        library: &Arc<GraphicsLibrary>,
        viewport: Viewport,
        cell: CellSize,
        material: PointsMaterial,
        surface: SurfaceId,
        rng: &mut R,
    ) -> Self {
        Self {
            origin: Vec3::ZERO,
            camera: PerspectiveCamera::new(viewport.aspect()),
            renderer: library.create_renderer(viewport, cell),
            points: PointCloud::random(rng, material),
            surface,
        }
    }

    /// Advance the animation to `elapsed_ms` since loop start.
    pub fn update(&mut self, elapsed_ms: f64, pointer_delta: Vec2) {
        let t = elapsed_ms * 0.0001;
        self.points.rotation = Vec2::new(
            (t * f64::from(ROTATION_SPEED.x)) as f32,
            (t * f64::from(ROTATION_SPEED.y)) as f32,
        );

        let cam = &mut self.camera.position;
        cam.x += (pointer_delta.x - cam.x) * SMOOTHING;
        cam.y += (-pointer_delta.y - cam.y) * SMOOTHING;
        self.camera.look_at(self.origin);
    }

    /// Rasterize the current state.
    pub fn render(&mut self) {
        self.renderer.render(&self.points, &self.camera);
    }

    /// Apply a new viewport size to the camera and the renderer.
    pub fn resize(&mut self, viewport: Viewport) {
        self.camera.set_aspect(viewport.aspect());
        self.renderer.set_size(viewport);
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn points(&self) -> &PointCloud {
        &self.points
    }

    pub fn surface(&self) -> SurfaceId {
        self.surface
    }
}
