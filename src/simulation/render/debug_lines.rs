use crate::rigid_body::Vec2;
use crate::rigid_body_system::{DebugRenderer, Rgba};

/// Collects debug lines into flat buffers for transfer to JS.
///
/// `points` holds `x0, y0, x1, y1` per line; `colors` one packed ABGR value
/// per line.
#[derive(Clone, Debug, Default)]
pub struct DebugLines {
    pub(crate) points: Vec<f32>,
    pub(crate) colors: Vec<u32>,
}

impl DebugLines {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.colors.clear();
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn points(&self) -> &[f32] {
        &self.points
    }

    pub fn colors(&self) -> &[u32] {
        &self.colors
    }
}

impl DebugRenderer for DebugLines {
    fn line(&mut self, from: Vec2, to: Vec2, color: Rgba) {
        self.points.extend_from_slice(&[from.x, from.y, to.x, to.y]);
        self.colors.push(color.to_abgr());
    }
}
