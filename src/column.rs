// Copyright (c) 2026 glyphrain contributors

use std::io::Result;

use crossterm::style::Color;
use rand::Rng;

use crate::glyph::GlyphSet;
use crate::terminal::Renderer;

const HEAD_COLOR: Color = Color::White;
const TRAIL_COLOR: Color = Color::Green;
const FADE_COLOR: Color = Color::DarkGreen;
const BACKGROUND: Color = Color::Black;

/// One falling drop: a bright leading edge and a fading trailing edge
/// travelling down the same horizontal position at independent paces. The
/// trailing edge only starts moving once the head has passed `fade_length`,
/// which gives the drop its shrinking lit tail.
pub struct Column {
    position: u16,
    height_limit: u16,
    head: u16,
    fade: u16,
    fade_length: u16,
}

impl Column {
    /// `height_limit` is the grid height at creation and is never re-read;
    /// a resize mid-life only affects the bounds checks in `paint`.
    pub fn new(position: u16, height_limit: u16, rng: &mut impl Rng) -> Self {
        let swing = rng.random_range(-30..50) as f32 / 100.0;
        let mut fade_length = ((height_limit as f32 / 3.0) * (1.0 + swing)) as u16;
        if fade_length > 0 {
            fade_length += rng.random_range(0..fade_length);
        }
        Self {
            position,
            height_limit,
            head: 1,
            fade: 0,
            fade_length,
        }
    }

    pub fn position(&self) -> u16 {
        self.position
    }

    /// Advance one frame. Returns `false` once the fade edge has swept the
    /// whole column, meaning the drop is done and should be dropped from the
    /// registry.
    pub fn step(
        &mut self,
        term: &mut impl Renderer,
        glyphs: GlyphSet,
        rng: &mut impl Rng,
    ) -> Result<bool> {
        if self.head < self.height_limit {
            self.paint(term, self.head, glyphs.next(rng), HEAD_COLOR)?;
            self.paint(term, self.head - 1, glyphs.next(rng), TRAIL_COLOR)?;
            self.head += 1;
        }

        if self.head > self.fade_length {
            self.paint(term, self.fade, glyphs.next(rng), FADE_COLOR)?;
            if let Some(tail) = self.fade.checked_sub(1) {
                self.paint(term, tail, ' ', BACKGROUND)?;
            }
            self.fade += 1;
        }

        if self.fade < self.height_limit {
            return Ok(true);
        }

        // Scrub the last lit cell before the drop goes away.
        if let Some(tail) = self.fade.checked_sub(1) {
            self.paint(term, tail, ' ', BACKGROUND)?;
        }
        Ok(false)
    }

    /// Bounds are checked against the terminal's CURRENT size, not
    /// `height_limit`; out-of-range writes after a shrink are dropped.
    fn paint(&self, term: &mut impl Renderer, y: u16, ch: char, fg: Color) -> Result<()> {
        let (width, height) = term.size();
        if self.position >= width.saturating_sub(1) || y >= height {
            return Ok(());
        }
        term.set_cursor(self.position, y)?;
        term.write_glyph(ch, fg, BACKGROUND)
    }

    #[cfg(test)]
    pub(crate) fn head(&self) -> u16 {
        self.head
    }

    #[cfg(test)]
    pub(crate) fn fade(&self) -> u16 {
        self.fade
    }

    #[cfg(test)]
    pub(crate) fn fade_length(&self) -> u16 {
        self.fade_length
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::terminal::FakeRenderer;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x5eed)
    }

    #[test]
    fn head_and_fade_never_move_backwards() {
        let mut rng = rng();
        let mut term = FakeRenderer::new(20, 12);
        let mut col = Column::new(3, 12, &mut rng);
        let (mut head, mut fade) = (col.head(), col.fade());
        for _ in 0..100 {
            let alive = col.step(&mut term, GlyphSet::Bin, &mut rng).unwrap();
            assert!(col.head() >= head);
            assert!(col.fade() >= fade);
            head = col.head();
            fade = col.fade();
            if !alive {
                return;
            }
        }
        panic!("column never finished");
    }

    #[test]
    fn finishes_exactly_when_fade_reaches_the_height_limit() {
        let mut rng = rng();
        let mut term = FakeRenderer::new(20, 8);
        let mut col = Column::new(0, 8, &mut rng);
        for _ in 0..100 {
            let alive = col.step(&mut term, GlyphSet::Bin, &mut rng).unwrap();
            assert_eq!(alive, col.fade() < 8);
            if !alive {
                return;
            }
        }
        panic!("column never finished");
    }

    #[test]
    fn fade_length_stays_in_the_randomized_band() {
        let mut rng = rng();
        for _ in 0..200 {
            let col = Column::new(0, 30, &mut rng);
            // base is (30/3) scaled by -30%..+50%, then stretched by at
            // most one extra base length
            assert!((7..30).contains(&col.fade_length()), "{}", col.fade_length());
        }
    }

    #[test]
    fn leading_edge_is_bright_and_its_wake_is_dimmer() {
        let mut rng = rng();
        let mut term = FakeRenderer::new(10, 10);
        let mut col = Column::new(2, 10, &mut rng);
        col.step(&mut term, GlyphSet::Bin, &mut rng).unwrap();
        let (x0, y0, _, fg0, _) = term.writes[0];
        let (x1, y1, _, fg1, _) = term.writes[1];
        assert_eq!((x0, y0, fg0), (2, 1, HEAD_COLOR));
        assert_eq!((x1, y1, fg1), (2, 0, TRAIL_COLOR));
    }

    #[test]
    fn paints_outside_a_shrunken_grid_are_dropped() {
        let mut rng = rng();
        // Column built when the grid was 12 rows tall; the fake is smaller.
        let mut term = FakeRenderer::new(10, 3);
        let mut col = Column::new(4, 12, &mut rng);
        for _ in 0..100 {
            if !col.step(&mut term, GlyphSet::Bin, &mut rng).unwrap() {
                break;
            }
        }
        assert!(term.writes.iter().all(|w| w.0 < 9 && w.1 < 3));
    }

    #[test]
    fn rightmost_cell_is_never_painted() {
        let mut rng = rng();
        let mut term = FakeRenderer::new(5, 5);
        let mut col = Column::new(4, 5, &mut rng);
        for _ in 0..100 {
            if !col.step(&mut term, GlyphSet::Bin, &mut rng).unwrap() {
                break;
            }
        }
        assert!(term.writes.is_empty());
    }
}
