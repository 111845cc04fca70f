//! Word-cloud layout by greedy spiral packing.
//!
//! Ranked entities are placed one at a time, best rank first, each at the
//! first point of an Archimedean spiral around the canvas centre where its
//! padded box clears every glyph placed before it. Later glyphs never move
//! earlier ones. An entity that finds no room is left out of the cloud.

use crate::color::SerializableColor;
use crate::entity::{Entity, EntityId};
use kurbo::{Point, Rect, Size};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use thiserror::Error;

/// Export canvas size for the word cloud.
pub const CLOUD_CANVAS: Size = Size::new(1920.0, 1080.0);

/// Gap kept around every glyph, in pixels.
pub const GLYPH_PADDING: f64 = 10.0;

/// Spiral steps tried per placement attempt.
pub const MAX_SPIRAL_STEPS: usize = 5000;

/// Angle advanced per spiral step, in radians.
const ANGLE_STEP: f64 = 0.2;

/// Spiral radius per radian of angle.
const RADIUS_PER_RADIAN: f64 = 10.0;

/// Widest a glyph may be, as a fraction of the canvas width.
const MAX_WIDTH_RATIO: f64 = 0.9;

/// Shrink factor applied while a glyph is too wide.
const SHRINK_FACTOR: f64 = 0.9;

/// Font size below which shrinking stops.
const MIN_SHRINK_SIZE: f64 = 10.0;

/// Glyphs at or below this size are not retried at half size.
const MIN_RETRY_SIZE: f64 = 20.0;

/// Word-cloud layout errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CloudError {
    #[error("No ranked words to lay out")]
    Empty,
}

/// Measures text extents for a given font size.
pub trait TextMeasure {
    /// Width and height of `text` set at `font_size`.
    fn measure(&self, text: &str, font_size: f64) -> Size;
}

impl<F> TextMeasure for F
where
    F: Fn(&str, f64) -> Size,
{
    fn measure(&self, text: &str, font_size: f64) -> Size {
        self(text, font_size)
    }
}

/// Character-count based measurement for when no shaper is available.
#[derive(Debug, Clone, Copy)]
pub struct ApproximateMeasure {
    /// Average advance of a narrow character, in ems.
    pub char_width_factor: f64,
    /// Line height, in ems.
    pub line_height: f64,
}

impl Default for ApproximateMeasure {
    fn default() -> Self {
        Self {
            char_width_factor: 0.55,
            line_height: 1.2,
        }
    }
}

impl TextMeasure for ApproximateMeasure {
    fn measure(&self, text: &str, font_size: f64) -> Size {
        let ems: f64 = text
            .chars()
            .map(|c| if is_wide(c) { 1.0 } else { self.char_width_factor })
            .sum();
        Size::new(ems * font_size, self.line_height * font_size)
    }
}

/// Full-width characters (CJK, kana, hangul, fullwidth forms) take a full em.
fn is_wide(c: char) -> bool {
    matches!(c as u32,
        0x1100..=0x115F
        | 0x2E80..=0x303E
        | 0x3041..=0x33FF
        | 0x3400..=0x4DBF
        | 0x4E00..=0x9FFF
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6)
}

/// A word placed on the cloud canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedGlyph {
    /// Entity this glyph was made from.
    pub id: EntityId,
    pub text: String,
    pub font_size: f64,
    /// Top-left corner.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: SerializableColor,
}

impl PlacedGlyph {
    /// Bounding box on the canvas.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size((self.x, self.y), (self.width, self.height))
    }
}

/// Result of a layout pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CloudLayout {
    /// Placed glyphs in rank order.
    pub glyphs: Vec<PlacedGlyph>,
    /// Entities that found no room.
    pub omitted: Vec<EntityId>,
}

/// Starting font size for a 1-based rank.
pub fn font_size_for_rank(rank: usize) -> f64 {
    let rank = rank.max(1);
    if rank <= 5 {
        return 250.0 - (rank - 1) as f64 * 20.0;
    }
    match (rank - 1) / 5 {
        1 => 120.0,
        2 => 90.0,
        3 => 70.0,
        4 => 50.0,
        group => (50.0 - (group - 4) as f64 * 5.0).max(30.0),
    }
}

/// Lays out ranked entities as a word cloud.
#[derive(Debug, Clone)]
pub struct CloudLayoutEngine<M> {
    measure: M,
    palette: Vec<SerializableColor>,
}

impl<M: TextMeasure> CloudLayoutEngine<M> {
    /// Create an engine with the given measurement and palette.
    pub fn new(measure: M, palette: Vec<SerializableColor>) -> Self {
        Self { measure, palette }
    }

    /// Lay out using the thread-local random source.
    pub fn layout(&self, ranked: &[Entity], canvas: Size) -> Result<CloudLayout, CloudError> {
        self.layout_with(ranked, canvas, &mut rand::thread_rng())
    }

    /// Lay out using the given random source for colors and spiral starts.
    pub fn layout_with<R: Rng + ?Sized>(
        &self,
        ranked: &[Entity],
        canvas: Size,
        rng: &mut R,
    ) -> Result<CloudLayout, CloudError> {
        if ranked.is_empty() {
            return Err(CloudError::Empty);
        }

        let mut layout = CloudLayout::default();
        let mut placed: Vec<Rect> = Vec::with_capacity(ranked.len());

        for (index, entity) in ranked.iter().enumerate() {
            let color = self
                .palette
                .choose(rng)
                .copied()
                .unwrap_or_else(SerializableColor::black);

            let mut font_size = font_size_for_rank(index + 1);
            let mut size = self.measure.measure(&entity.text, font_size);
            while size.width > canvas.width * MAX_WIDTH_RATIO && font_size > MIN_SHRINK_SIZE {
                font_size *= SHRINK_FACTOR;
                size = self.measure.measure(&entity.text, font_size);
            }

            let mut rect = spiral_search(size, canvas, &placed, rng);
            if rect.is_none() && font_size > MIN_RETRY_SIZE {
                font_size /= 2.0;
                size = self.measure.measure(&entity.text, font_size);
                rect = spiral_search(size, canvas, &placed, rng);
            }

            match rect {
                Some(rect) => {
                    placed.push(rect);
                    layout.glyphs.push(PlacedGlyph {
                        id: entity.id,
                        text: entity.text.clone(),
                        font_size,
                        x: rect.x0,
                        y: rect.y0,
                        width: rect.width(),
                        height: rect.height(),
                        color,
                    });
                }
                None => {
                    log::warn!(
                        "Could not place \"{}\" (rank {}) in word cloud",
                        entity.text,
                        index + 1
                    );
                    layout.omitted.push(entity.id);
                }
            }
        }

        log::debug!(
            "Word cloud: placed {}, omitted {}",
            layout.glyphs.len(),
            layout.omitted.len()
        );
        Ok(layout)
    }
}

impl Default for CloudLayoutEngine<ApproximateMeasure> {
    fn default() -> Self {
        Self::new(ApproximateMeasure::default(), crate::color::default_palette())
    }
}

/// Walk the spiral from the canvas centre looking for a free box.
fn spiral_search<R: Rng + ?Sized>(size: Size, canvas: Size, placed: &[Rect], rng: &mut R) -> Option<Rect> {
    let center = Point::new(canvas.width / 2.0, canvas.height / 2.0);
    let mut angle = rng.gen_range(0.0..TAU);
    let mut radius = 0.0;

    for _ in 0..MAX_SPIRAL_STEPS {
        let origin = Point::new(
            center.x + radius * angle.cos() - size.width / 2.0,
            center.y + radius * angle.sin() - size.height / 2.0,
        );
        let rect = Rect::from_origin_size(origin, size);
        if inside(rect, canvas) && !collides(rect, placed) {
            return Some(rect);
        }
        angle += ANGLE_STEP;
        radius = RADIUS_PER_RADIAN * angle;
    }
    None
}

fn inside(rect: Rect, canvas: Size) -> bool {
    rect.x0 >= 0.0 && rect.y0 >= 0.0 && rect.x1 <= canvas.width && rect.y1 <= canvas.height
}

fn collides(rect: Rect, placed: &[Rect]) -> bool {
    let padded = rect.inflate(GLYPH_PADDING, GLYPH_PADDING);
    placed.iter().any(|other| padded.intersect(*other).area() > 0.0)
}
