//! Terminal rasterization of the point cloud.
//!
//! The [`GraphicsLibrary`] is the shared, lazily loaded part: it knows the
//! terminal's color depth and glyph ramp. Each session owns a [`Renderer`]
//! created from it, which accumulates point intensity into a cell grid and
//! paints that grid as styled spans.

use std::sync::Arc;

use folio_core::{CellSize, Viewport};
use glam::Vec3;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::chars::{ASCII_POINT_GLYPHS, POINT_GLYPHS};
use crate::color::{ColorDepth, blend_additive, to_terminal_color};
use crate::loader::LoadError;
use crate::scene::{Blending, PerspectiveCamera, PointCloud, PointsMaterial};

/// Intensity covered by one step of the glyph ramp.
const GLYPH_STEP: f32 = 0.7;

/// Opacity of the whole background layer over the page.
const LAYER_OPACITY: f32 = 0.6;

/// Bounds of the perspective size factor applied to each point.
const MIN_ATTENUATION: f32 = 0.25;
const MAX_ATTENUATION: f32 = 2.0;

/// Terminal environment relevant to rasterization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TerminalProbe {
    pub term: Option<String>,
    pub colorterm: Option<String>,
    pub lang: Option<String>,
}

impl TerminalProbe {
    /// Read the probe from the process environment.
    pub fn from_env() -> Self {
        Self {
            term: std::env::var("TERM").ok(),
            colorterm: std::env::var("COLORTERM").ok(),
            lang: std::env::var("LC_ALL")
                .or_else(|_| std::env::var("LANG"))
                .ok(),
        }
    }

    fn is_utf8(&self) -> bool {
        self.lang
            .as_deref()
            .map(|l| {
                let l = l.to_ascii_lowercase();
                l.contains("utf-8") || l.contains("utf8")
            })
            .unwrap_or(false)
    }
}

/// Shared rasterization capabilities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphicsLibrary {
    depth: ColorDepth,
    glyphs: &'static [char],
}

impl GraphicsLibrary {
    pub fn new(depth: ColorDepth, glyphs: &'static [char]) -> Self {
        Self { depth, glyphs }
    }

    /// Build the library for the probed terminal.
    pub fn from_probe(probe: &TerminalProbe) -> Result<Self, LoadError> {
        if probe.term.as_deref() == Some("dumb") {
            return Err(LoadError::Unsupported("dumb".to_string()));
        }
        let glyphs = if probe.is_utf8() {
            POINT_GLYPHS
        } else {
            ASCII_POINT_GLYPHS
        };
        Ok(Self::new(ColorDepth::detect(probe.colorterm.as_deref()), glyphs))
    }

    pub fn color_depth(&self) -> ColorDepth {
        self.depth
    }

    /// Glyph for an accumulated intensity, or `None` for an empty cell.
    pub fn glyph_for(&self, intensity: f32) -> Option<char> {
        if intensity <= 0.0 || self.glyphs.is_empty() {
            return None;
        }
        let idx = ((intensity / GLYPH_STEP) as usize).min(self.glyphs.len() - 1);
        Some(self.glyphs[idx])
    }

    /// Create a renderer drawing into a surface of the given size.
    pub fn create_renderer(self: &Arc<Self>, viewport: Viewport, cell: CellSize) -> Renderer {
        let mut renderer = Renderer {
            library: Arc::clone(self),
            viewport,
            cell,
            cols: 0,
            rows: 0,
            intensity: Vec::new(),
            frames: 0,
        };
        renderer.set_size(viewport);
        renderer
    }
}

/// Per-session rasterizer with its own cell grid.
#[derive(Debug)]
pub struct Renderer {
    library: Arc<GraphicsLibrary>,
    viewport: Viewport,
    cell: CellSize,
    cols: u16,
    rows: u16,
    intensity: Vec<f32>,
    frames: u64,
}

impl Renderer {
    /// Resize the output surface.
    pub fn set_size(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        let max = u32::from(u16::MAX);
        self.cols = (viewport.width / u32::from(self.cell.width)).clamp(1, max) as u16;
        self.rows = (viewport.height / u32::from(self.cell.height)).clamp(1, max) as u16;
        self.intensity = vec![0.0; usize::from(self.cols) * usize::from(self.rows)];
    }

    /// Surface size in pixels.
    pub fn size(&self) -> Viewport {
        self.viewport
    }

    /// Grid size in cells.
    pub fn grid(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    /// Number of completed render passes.
    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    /// Accumulated intensity at a cell.
    pub fn intensity_at(&self, col: u16, row: u16) -> f32 {
        if col >= self.cols || row >= self.rows {
            return 0.0;
        }
        self.intensity[usize::from(row) * usize::from(self.cols) + usize::from(col)]
    }

    /// Number of cells with at least one point.
    pub fn lit_cells(&self) -> usize {
        self.intensity.iter().filter(|i| **i > 0.0).count()
    }

    /// Rasterize the cloud as seen from `camera`.
    pub fn render(&mut self, points: &PointCloud, camera: &PerspectiveCamera) {
        self.intensity.fill(0.0);

        let model = points.model_rotation();
        let view = camera.view_matrix();
        let view_proj = camera.projection_matrix() * view;
        let scale = self.viewport.height as f32 / 2.0;
        let material = points.material();

        for local in points.iter_points() {
            let world = model * local;
            let depth = -(view * world.extend(1.0)).z;
            if depth <= 0.0 {
                continue;
            }
            let clip = view_proj * world.extend(1.0);
            if clip.w <= 0.0 {
                continue;
            }
            let ndc: Vec3 = clip.truncate() / clip.w;
            if ndc.x.abs() > 1.0 || ndc.y.abs() > 1.0 || ndc.z.abs() > 1.0 {
                continue;
            }

            let col = (((ndc.x + 1.0) * 0.5 * f32::from(self.cols)) as u16).min(self.cols - 1);
            let row = (((1.0 - ndc.y) * 0.5 * f32::from(self.rows)) as u16).min(self.rows - 1);
            let weight =
                material.opacity * (scale / depth).clamp(MIN_ATTENUATION, MAX_ATTENUATION);

            let idx = usize::from(row) * usize::from(self.cols) + usize::from(col);
            let cell = &mut self.intensity[idx];
            *cell = match material.blending {
                Blending::Additive => *cell + weight,
                Blending::Normal => cell.max(weight),
            };
        }

        self.frames += 1;
    }

    /// Build the styled lines for the current grid.
    pub fn lines(&self, material: &PointsMaterial) -> Vec<Line<'static>> {
        (0..self.rows)
            .map(|row| {
                let spans: Vec<Span> = (0..self.cols)
                    .map(|col| self.cell_span(col, row, material))
                    .collect();
                Line::from(spans)
            })
            .collect()
    }

    /// Paint the grid into `area` of the frame.
    pub fn draw(&self, frame: &mut Frame, area: Rect, material: &PointsMaterial) {
        frame.render_widget(Paragraph::new(self.lines(material)), area);
    }

    fn cell_span(&self, col: u16, row: u16, material: &PointsMaterial) -> Span<'static> {
        let intensity = self.intensity_at(col, row);
        match self.library.glyph_for(intensity) {
            Some(ch) => {
                let rgb = blend_additive(material.color, intensity * LAYER_OPACITY);
                let color = to_terminal_color(rgb, self.library.color_depth());
                Span::styled(ch.to_string(), Style::new().fg(color))
            }
            None => Span::raw(" "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> Arc<GraphicsLibrary> {
        Arc::new(GraphicsLibrary::new(ColorDepth::TrueColor, POINT_GLYPHS))
    }

    #[test]
    fn test_probe_rejects_dumb_terminal() {
        let probe = TerminalProbe {
            term: Some("dumb".to_string()),
            ..Default::default()
        };
        assert!(GraphicsLibrary::from_probe(&probe).is_err());
    }

    #[test]
    fn test_probe_picks_glyphs_and_depth() {
        let probe = TerminalProbe {
            term: Some("xterm-256color".to_string()),
            colorterm: Some("truecolor".to_string()),
            lang: Some("en_US.UTF-8".to_string()),
        };
        let lib = GraphicsLibrary::from_probe(&probe).unwrap();
        assert_eq!(lib.color_depth(), ColorDepth::TrueColor);
        assert_eq!(lib.glyph_for(0.1), Some('·'));

        let ascii = GraphicsLibrary::from_probe(&TerminalProbe::default()).unwrap();
        assert_eq!(ascii.color_depth(), ColorDepth::Ansi256);
        assert_eq!(ascii.glyph_for(0.1), Some('.'));
    }

    #[test]
    fn test_glyph_ramp_saturates() {
        let lib = library();
        assert_eq!(lib.glyph_for(0.0), None);
        assert_eq!(lib.glyph_for(1.0), Some('∙'));
        assert_eq!(lib.glyph_for(100.0), Some('✦'));
    }

    #[test]
    fn test_renderer_grid_follows_size() {
        let mut renderer = library().create_renderer(Viewport::new(960, 640), CellSize::default());
        assert_eq!(renderer.grid(), (120, 40));

        renderer.set_size(Viewport::new(400, 160));
        assert_eq!(renderer.grid(), (50, 10));
        assert_eq!(renderer.size(), Viewport::new(400, 160));
    }

    #[test]
    fn test_point_on_axis_lands_in_center_cell() {
        let vp = Viewport::new(800, 800);
        let mut renderer = library().create_renderer(vp, CellSize::new(8, 8));
        let cloud = PointCloud::from_positions(vec![0.0, 0.0, 0.0], PointsMaterial::default());
        let mut camera = PerspectiveCamera::new(vp.aspect());
        camera.look_at(Vec3::ZERO);

        renderer.render(&cloud, &camera);

        assert_eq!(renderer.frames_rendered(), 1);
        assert_eq!(renderer.lit_cells(), 1);
        assert!(renderer.intensity_at(50, 50) > 0.0);
    }

    #[test]
    fn test_points_behind_camera_are_culled() {
        let vp = Viewport::new(800, 800);
        let mut renderer = library().create_renderer(vp, CellSize::new(8, 8));
        let cloud = PointCloud::from_positions(vec![0.0, 0.0, 350.0], PointsMaterial::default());
        let mut camera = PerspectiveCamera::new(vp.aspect());
        camera.look_at(Vec3::ZERO);

        renderer.render(&cloud, &camera);
        assert_eq!(renderer.lit_cells(), 0);
    }

    #[test]
    fn test_additive_blending_accumulates() {
        let vp = Viewport::new(800, 800);
        let mut renderer = library().create_renderer(vp, CellSize::new(8, 8));
        let single = PointCloud::from_positions(vec![0.0, 0.0, 0.0], PointsMaterial::default());
        let double = PointCloud::from_positions(
            vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            PointsMaterial::default(),
        );
        let mut camera = PerspectiveCamera::new(vp.aspect());
        camera.look_at(Vec3::ZERO);

        renderer.render(&single, &camera);
        let one = renderer.intensity_at(50, 50);
        renderer.render(&double, &camera);
        let two = renderer.intensity_at(50, 50);

        assert!((two - 2.0 * one).abs() < 1e-5);
    }
}
