//! SVG path reader
//!
//! Every `<path>` element's data is turned into one polyline per subpath.
//! Curve segments are sampled at a fixed parametric step. SVG user space is
//! y-down; returned points are y-up.

use crate::error::{ContourError, ContourResult};
use crate::primitive::PathPrimitive;
use hotwirekit_core::Point2D;
use lyon::geom::{
    point, vector, Angle, ArcFlags, CubicBezierSegment, QuadraticBezierSegment, SvgArc,
};
use regex::Regex;
use std::sync::LazyLock;

/// Parametric step used to sample curve segments
pub const SAMPLE_STEP: f64 = 0.05;

static PATH_ELEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<path\s+([^>]+)>"#).expect("invalid path regex"));
static PATH_DATA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:^|\s)d\s*=\s*["']([^"']+)["']"#).expect("invalid d regex")
});
static PATH_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([MmLlHhVvCcSsQqTtAaZz])|([-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?)")
        .expect("invalid token regex")
});

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Command(char),
    Number(f64),
}

/// Split path data into commands and numbers
fn tokenize_svg_path(data: &str) -> Vec<Token> {
    PATH_TOKEN
        .captures_iter(data)
        .filter_map(|caps| {
            if let Some(cmd) = caps.get(1) {
                cmd.as_str().chars().next().map(Token::Command)
            } else {
                caps.get(2)
                    .and_then(|n| n.as_str().parse().ok())
                    .map(Token::Number)
            }
        })
        .collect()
}

/// Read every `<path>` element of an SVG document
pub fn primitives_from_svg(text: &str) -> ContourResult<Vec<PathPrimitive>> {
    let mut primitives = Vec::new();
    for element in PATH_ELEMENT.captures_iter(text) {
        if let Some(data) = PATH_DATA.captures(&element[1]) {
            primitives.extend(primitives_from_path_data(&data[1])?);
        }
    }

    if primitives.is_empty() {
        return Err(ContourError::EmptyInput(
            "SVG document has no path data".to_string(),
        ));
    }
    tracing::debug!(count = primitives.len(), "read SVG primitives");
    Ok(primitives)
}

/// Convert one path's `d` attribute into polylines, one per subpath
pub fn primitives_from_path_data(data: &str) -> ContourResult<Vec<PathPrimitive>> {
    let mut reader = PathReader::new(tokenize_svg_path(data));
    reader.run()?;
    Ok(reader.finish())
}

struct PathReader {
    tokens: Vec<Token>,
    pos: usize,
    current: Point2D,
    start: Point2D,
    /// Second control point of the previous cubic, for `S`
    last_cubic: Option<Point2D>,
    /// Control point of the previous quadratic, for `T`
    last_quad: Option<Point2D>,
    subpath: Vec<Point2D>,
    out: Vec<PathPrimitive>,
}

impl PathReader {
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            current: Point2D::ORIGIN,
            start: Point2D::ORIGIN,
            last_cubic: None,
            last_quad: None,
            subpath: Vec::new(),
            out: Vec::new(),
        }
    }

    fn run(&mut self) -> ContourResult<()> {
        let mut previous: Option<char> = None;
        while let Some(token) = self.tokens.get(self.pos).copied() {
            let cmd = match token {
                Token::Command(c) => {
                    self.pos += 1;
                    c
                }
                // implicit repeat; a moveto repeats as lineto
                Token::Number(_) => match previous {
                    Some('M') => 'L',
                    Some('m') => 'l',
                    Some(c) if !matches!(c, 'Z' | 'z') => c,
                    _ => {
                        return Err(ContourError::Svg(
                            "path data has a number without a command".to_string(),
                        ))
                    }
                },
            };
            self.step(cmd)?;
            previous = Some(cmd);
        }
        Ok(())
    }

    fn step(&mut self, cmd: char) -> ContourResult<()> {
        let relative = cmd.is_ascii_lowercase();
        let base = if relative {
            self.current
        } else {
            Point2D::ORIGIN
        };
        let upper = cmd.to_ascii_uppercase();

        match upper {
            'M' => {
                let to = base + self.point(cmd)?;
                self.flush();
                self.subpath.push(to);
                self.current = to;
                self.start = to;
            }
            'L' => {
                let to = base + self.point(cmd)?;
                self.line_to(to);
            }
            'H' => {
                let x = self.number(cmd)?;
                let x = if relative { self.current.x + x } else { x };
                self.line_to(Point2D::new(x, self.current.y));
            }
            'V' => {
                let y = self.number(cmd)?;
                let y = if relative { self.current.y + y } else { y };
                self.line_to(Point2D::new(self.current.x, y));
            }
            'C' | 'S' => {
                let ctrl1 = if upper == 'C' {
                    base + self.point(cmd)?
                } else {
                    self.reflect(self.last_cubic)
                };
                let ctrl2 = base + self.point(cmd)?;
                let to = base + self.point(cmd)?;
                let segment = CubicBezierSegment {
                    from: lyon_point(self.current),
                    ctrl1: lyon_point(ctrl1),
                    ctrl2: lyon_point(ctrl2),
                    to: lyon_point(to),
                };
                self.sample(|t| segment.sample(t), to);
                self.last_cubic = Some(ctrl2);
                self.last_quad = None;
                return Ok(());
            }
            'Q' | 'T' => {
                let ctrl = if upper == 'Q' {
                    base + self.point(cmd)?
                } else {
                    self.reflect(self.last_quad)
                };
                let to = base + self.point(cmd)?;
                let segment = QuadraticBezierSegment {
                    from: lyon_point(self.current),
                    ctrl: lyon_point(ctrl),
                    to: lyon_point(to),
                };
                self.sample(|t| segment.sample(t), to);
                self.last_quad = Some(ctrl);
                self.last_cubic = None;
                return Ok(());
            }
            'A' => {
                let rx = self.number(cmd)?;
                let ry = self.number(cmd)?;
                let rotation = self.number(cmd)?;
                let large_arc = self.number(cmd)? != 0.0;
                let sweep = self.number(cmd)? != 0.0;
                let to = base + self.point(cmd)?;
                let arc = SvgArc {
                    from: lyon_point(self.current),
                    to: lyon_point(to),
                    radii: vector(rx.abs(), ry.abs()),
                    x_rotation: Angle::degrees(rotation),
                    flags: ArcFlags { large_arc, sweep },
                };
                if arc.is_straight_line() {
                    self.line_to(to);
                } else {
                    let arc = arc.to_arc();
                    self.sample(|t| arc.sample(t), to);
                }
            }
            'Z' => {
                if !self.subpath.is_empty() {
                    self.subpath.push(self.start);
                    self.flush();
                }
                self.current = self.start;
            }
            other => {
                return Err(ContourError::Svg(format!(
                    "unsupported path command '{}'",
                    other
                )))
            }
        }

        self.last_cubic = None;
        self.last_quad = None;
        Ok(())
    }

    fn number(&mut self, cmd: char) -> ContourResult<f64> {
        match self.tokens.get(self.pos) {
            Some(Token::Number(n)) => {
                self.pos += 1;
                Ok(*n)
            }
            _ => Err(ContourError::Svg(format!(
                "missing argument for path command '{}'",
                cmd
            ))),
        }
    }

    fn point(&mut self, cmd: char) -> ContourResult<Point2D> {
        let x = self.number(cmd)?;
        let y = self.number(cmd)?;
        Ok(Point2D::new(x, y))
    }

    fn reflect(&self, ctrl: Option<Point2D>) -> Point2D {
        match ctrl {
            Some(c) => self.current * 2.0 - c,
            None => self.current,
        }
    }

    fn begin_if_needed(&mut self) {
        if self.subpath.is_empty() {
            self.subpath.push(self.current);
        }
    }

    fn line_to(&mut self, to: Point2D) {
        self.begin_if_needed();
        self.subpath.push(to);
        self.current = to;
    }

    fn sample<F>(&mut self, at: F, to: Point2D)
    where
        F: Fn(f64) -> lyon::geom::Point<f64>,
    {
        self.begin_if_needed();
        let steps = (1.0 / SAMPLE_STEP).round() as usize;
        for k in 1..steps {
            let p = at(k as f64 / steps as f64);
            self.subpath.push(Point2D::new(p.x, p.y));
        }
        self.subpath.push(to);
        self.current = to;
    }

    fn flush(&mut self) {
        let points = std::mem::take(&mut self.subpath);
        if points.len() >= 2 {
            let flipped = points.into_iter().map(|p| Point2D::new(p.x, -p.y)).collect();
            if let Some(p) = PathPrimitive::polyline(flipped) {
                self.out.push(p);
            }
        }
    }

    fn finish(mut self) -> Vec<PathPrimitive> {
        self.flush();
        self.out
    }
}

fn lyon_point(p: Point2D) -> lyon::geom::Point<f64> {
    point(p.x, p.y)
}
