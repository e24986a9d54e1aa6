//! Text extrusion
//!
//! Glyph outlines come from a [`GlyphOutliner`]. [`FontGlyphs`] walks the
//! TrueType outlines of a bundled font and flattens their curves; a glyph's
//! inner contours (the counter of an "O") stay open in the extruded solid.
//! [`BlockGlyphs`] draws every visible character as a solid block.

use manifold_rs::Manifold;
use ttf_parser::{Face, OutlineBuilder};
use vcad::Part;

/// Closed 2D polygon in the text's local XY plane.
pub type Outline = Vec<[f64; 2]>;

/// Contours of one glyph. Outer contours run counter-clockwise, holes
/// clockwise.
pub type Glyph = Vec<Outline>;

/// Source of glyph outlines for text shapes
pub trait GlyphOutliner {
    /// Glyphs of `text` at the given `size`, centered on the origin.
    fn outline(&self, text: &str, size: f64) -> Vec<Glyph>;
}

/// Line segments per flattened curve
const CURVE_STEPS: usize = 8;

/// Glyph outlines read from a TrueType font.
#[derive(Debug, Clone, Copy)]
pub struct FontGlyphs {
    font: &'static [u8],
}

impl Default for FontGlyphs {
    fn default() -> Self {
        Self {
            font: epaint_default_fonts::UBUNTU_LIGHT,
        }
    }
}

impl FontGlyphs {
    /// Use another font; fails if the bytes are not a parsable face.
    pub fn from_font(font: &'static [u8]) -> Result<Self, ttf_parser::FaceParsingError> {
        Face::parse(font, 0)?;
        Ok(Self { font })
    }
}

impl GlyphOutliner for FontGlyphs {
    fn outline(&self, text: &str, size: f64) -> Vec<Glyph> {
        let face = match Face::parse(self.font, 0) {
            Ok(face) => face,
            Err(e) => {
                tracing::error!("font parsing failed: {e}");
                return Vec::new();
            }
        };
        let scale = size / f64::from(face.units_per_em());
        let fallback = face.glyph_index('?');

        let mut glyphs = Vec::new();
        let mut pen_x = 0.0;
        for c in text.chars() {
            let Some(id) = face.glyph_index(c).or(fallback) else {
                tracing::warn!("no glyph for {c:?}");
                continue;
            };
            if !c.is_whitespace() {
                let mut collector = ContourCollector::new(pen_x, scale);
                face.outline_glyph(id, &mut collector);
                let mut glyph = collector.finish();
                if !glyph.is_empty() {
                    orient(&mut glyph);
                    glyphs.push(glyph);
                }
            }
            pen_x += f64::from(face.glyph_hor_advance(id).unwrap_or(0)) * scale;
        }

        center(&mut glyphs);
        glyphs
    }
}

/// Flattens glyph curves into polygons, already scaled and placed.
struct ContourCollector {
    contours: Vec<Outline>,
    current: Outline,
    offset_x: f64,
    scale: f64,
}

impl ContourCollector {
    fn new(offset_x: f64, scale: f64) -> Self {
        Self {
            contours: Vec::new(),
            current: Vec::new(),
            offset_x,
            scale,
        }
    }

    fn map(&self, x: f32, y: f32) -> [f64; 2] {
        [
            self.offset_x + f64::from(x) * self.scale,
            f64::from(y) * self.scale,
        ]
    }

    fn last(&self) -> [f64; 2] {
        self.current.last().copied().unwrap_or([self.offset_x, 0.0])
    }

    fn push(&mut self, p: [f64; 2]) {
        if !self.current.last().is_some_and(|q| coincident(*q, p)) {
            self.current.push(p);
        }
    }

    fn end_contour(&mut self) {
        let mut contour = std::mem::take(&mut self.current);
        if contour.len() > 1 && coincident(contour[0], contour[contour.len() - 1]) {
            contour.pop();
        }
        if contour.len() >= 3 {
            self.contours.push(contour);
        }
    }

    fn finish(mut self) -> Glyph {
        self.end_contour();
        self.contours
    }
}

fn coincident(a: [f64; 2], b: [f64; 2]) -> bool {
    (a[0] - b[0]).abs() < 1e-9 && (a[1] - b[1]).abs() < 1e-9
}

impl OutlineBuilder for ContourCollector {
    fn move_to(&mut self, x: f32, y: f32) {
        self.end_contour();
        let p = self.map(x, y);
        self.push(p);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.map(x, y);
        self.push(p);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let p0 = self.last();
        let (p1, p2) = (self.map(x1, y1), self.map(x, y));
        for i in 1..=CURVE_STEPS {
            let t = i as f64 / CURVE_STEPS as f64;
            let u = 1.0 - t;
            let point = [
                u * u * p0[0] + 2.0 * u * t * p1[0] + t * t * p2[0],
                u * u * p0[1] + 2.0 * u * t * p1[1] + t * t * p2[1],
            ];
            self.push(point);
        }
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let p0 = self.last();
        let (p1, p2, p3) = (self.map(x1, y1), self.map(x2, y2), self.map(x, y));
        for i in 1..=CURVE_STEPS {
            let t = i as f64 / CURVE_STEPS as f64;
            let u = 1.0 - t;
            let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
            let point = [
                a * p0[0] + b * p1[0] + c * p2[0] + d * p3[0],
                a * p0[1] + b * p1[1] + c * p2[1] + d * p3[1],
            ];
            self.push(point);
        }
    }

    fn close(&mut self) {
        self.end_contour();
    }
}

/// Signed area; positive for counter-clockwise polygons.
pub fn signed_area(outline: &[[f64; 2]]) -> f64 {
    (0..outline.len())
        .map(|i| {
            let a = outline[i];
            let b = outline[(i + 1) % outline.len()];
            a[0] * b[1] - b[0] * a[1]
        })
        .sum::<f64>()
        / 2.0
}

/// TrueType outer contours run clockwise; flip the glyph so they run
/// counter-clockwise and its holes clockwise.
fn orient(glyph: &mut Glyph) {
    let total: f64 = glyph.iter().map(|c| signed_area(c)).sum();
    if total < 0.0 {
        for contour in glyph.iter_mut() {
            contour.reverse();
        }
    }
}

/// Shift all glyphs so their joint bounding box is centered on the origin.
fn center(glyphs: &mut [Glyph]) {
    let mut lo = [f64::MAX; 2];
    let mut hi = [f64::MIN; 2];
    for p in glyphs.iter().flatten().flatten() {
        for k in 0..2 {
            lo[k] = lo[k].min(p[k]);
            hi[k] = hi[k].max(p[k]);
        }
    }
    if lo[0] > hi[0] {
        return;
    }
    let shift = [(lo[0] + hi[0]) / 2.0, (lo[1] + hi[1]) / 2.0];
    for p in glyphs.iter_mut().flatten().flatten() {
        p[0] -= shift[0];
        p[1] -= shift[1];
    }
}

/// Monospace block glyphs: one `0.5 × 1.0` cell per visible character.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockGlyphs;

/// Horizontal advance per character, relative to the text size
const ADVANCE: f64 = 0.6;
/// Glyph block width, relative to the text size
const GLYPH_WIDTH: f64 = 0.5;

impl GlyphOutliner for BlockGlyphs {
    fn outline(&self, text: &str, size: f64) -> Vec<Glyph> {
        let count = text.chars().count();
        if count == 0 {
            return Vec::new();
        }

        let advance = ADVANCE * size;
        let glyph_width = GLYPH_WIDTH * size;
        let total_width = advance * (count - 1) as f64 + glyph_width;
        let x_origin = -total_width / 2.0;
        let (y0, y1) = (-size / 2.0, size / 2.0);

        text.chars()
            .enumerate()
            .filter(|(_, c)| !c.is_whitespace())
            .map(|(i, _)| {
                let x0 = x_origin + advance * i as f64;
                let x1 = x0 + glyph_width;
                vec![vec![[x0, y0], [x1, y0], [x1, y1], [x0, y1]]]
            })
            .collect()
    }
}

/// Extrude glyphs along +Z from 0 to `depth`.
///
/// All contours of a glyph go to Manifold together so inner contours become
/// holes; glyphs are extruded separately and unioned.
pub fn extrude_text(id: &str, glyphs: &[Glyph], depth: f64) -> Option<Part> {
    let mut result: Option<Manifold> = None;

    for (i, glyph) in glyphs.iter().enumerate() {
        let polygons: Vec<Vec<f64>> = glyph
            .iter()
            .map(|contour| contour.iter().flat_map(|p| [p[0], p[1]]).collect())
            .collect();
        let slices: Vec<&[f64]> = polygons.iter().map(|p| p.as_slice()).collect();

        let manifold = Manifold::extrude(&slices, depth, 1, 0.0, 1.0, 1.0);
        if manifold.is_empty() {
            tracing::warn!("extrude_text: glyph {} of {} produced no geometry", i, id);
            continue;
        }

        result = match result {
            Some(existing) => Some(existing.union(&manifold)),
            None => Some(manifold),
        };
    }

    result.map(|manifold| Part::new(id, manifold))
}
