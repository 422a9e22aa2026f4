use kurbo::PathEl;

use crate::foundation::core::{BezPath, Point, Rect};

/// Control-point factor for approximating a quarter circle with one cubic.
const QUARTER_ARC_KAPPA: f64 = 0.552_284_749_830_793_4;

/// One drawing command of a vector path.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum PathCommand {
    /// Start a new subpath at the point.
    MoveTo(Point),
    /// Straight segment to the point.
    LineTo(Point),
    /// Quadratic Bézier: `(control, end)`.
    QuadTo(Point, Point),
    /// Cubic Bézier: `(control1, control2, end)`.
    CubicTo(Point, Point, Point),
    /// Reconnect to the start of the current subpath.
    Close,
}

/// Ordered, immutable sequence of [`PathCommand`]s.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PathDefinition {
    commands: Vec<PathCommand>,
}

impl PathDefinition {
    /// Wrap an authored command list.
    pub fn new(commands: Vec<PathCommand>) -> Self {
        Self { commands }
    }

    /// Start a [`PathBuilder`].
    pub fn builder() -> PathBuilder {
        PathBuilder::default()
    }

    /// Borrow the commands in authoring order.
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Number of commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the path has no commands.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Rounded rectangle outline.
    ///
    /// The outline starts at the left-edge midpoint, runs up the left edge and continues
    /// clockwise on screen (y down), matching the start and winding of the hand-authored poses.
    /// `radius` is clamped to half the shorter side.
    pub fn rounded_rect(rect: Rect, radius: f64) -> Self {
        let r = radius.max(0.0).min(rect.width() / 2.0).min(rect.height() / 2.0);
        let k = r * (1.0 - QUARTER_ARC_KAPPA);
        let (x0, y0, x1, y1) = (rect.x0, rect.y0, rect.x1, rect.y1);
        let mid_y = (y0 + y1) / 2.0;

        PathDefinition::builder()
            .move_to((x0, mid_y))
            .line_to((x0, y0 + r))
            .cubic_to((x0, y0 + k), (x0 + k, y0), (x0 + r, y0))
            .line_to((x1 - r, y0))
            .cubic_to((x1 - k, y0), (x1, y0 + k), (x1, y0 + r))
            .line_to((x1, y1 - r))
            .cubic_to((x1, y1 - k), (x1 - k, y1), (x1 - r, y1))
            .line_to((x0 + r, y1))
            .cubic_to((x0 + k, y1), (x0, y1 - k), (x0, y1 - r))
            .line_to((x0, mid_y))
            .close()
            .build()
    }

    /// Convert to a `kurbo` path (for SVG export and renderers).
    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(p) => path.move_to(p),
                PathCommand::LineTo(p) => path.line_to(p),
                PathCommand::QuadTo(c, p) => path.quad_to(c, p),
                PathCommand::CubicTo(c1, c2, p) => path.curve_to(c1, c2, p),
                PathCommand::Close => path.close_path(),
            }
        }
        path
    }
}

impl From<&BezPath> for PathDefinition {
    fn from(path: &BezPath) -> Self {
        let commands = path
            .elements()
            .iter()
            .map(|el| match *el {
                PathEl::MoveTo(p) => PathCommand::MoveTo(p),
                PathEl::LineTo(p) => PathCommand::LineTo(p),
                PathEl::QuadTo(c, p) => PathCommand::QuadTo(c, p),
                PathEl::CurveTo(c1, c2, p) => PathCommand::CubicTo(c1, c2, p),
                PathEl::ClosePath => PathCommand::Close,
            })
            .collect();
        Self { commands }
    }
}

/// Fluent builder for [`PathDefinition`].
#[derive(Clone, Debug, Default)]
pub struct PathBuilder {
    commands: Vec<PathCommand>,
}

impl PathBuilder {
    /// Append a `MoveTo`.
    pub fn move_to(mut self, p: impl Into<Point>) -> Self {
        self.commands.push(PathCommand::MoveTo(p.into()));
        self
    }

    /// Append a `LineTo`.
    pub fn line_to(mut self, p: impl Into<Point>) -> Self {
        self.commands.push(PathCommand::LineTo(p.into()));
        self
    }

    /// Append a `QuadTo`.
    pub fn quad_to(mut self, c: impl Into<Point>, p: impl Into<Point>) -> Self {
        self.commands.push(PathCommand::QuadTo(c.into(), p.into()));
        self
    }

    /// Append a `CubicTo`.
    pub fn cubic_to(
        mut self,
        c1: impl Into<Point>,
        c2: impl Into<Point>,
        p: impl Into<Point>,
    ) -> Self {
        self.commands
            .push(PathCommand::CubicTo(c1.into(), c2.into(), p.into()));
        self
    }

    /// Append a `Close`.
    pub fn close(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    /// Finish the path.
    pub fn build(self) -> PathDefinition {
        PathDefinition::new(self.commands)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/path.rs"]
mod tests;
