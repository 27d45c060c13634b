// Copyright (c) 2026 glyphrain contributors

use std::collections::HashMap;
use std::io::Result;

use rand::Rng;

use crate::column::Column;
use crate::glyph::GlyphSet;
use crate::terminal::Renderer;

/// Active columns keyed by horizontal position. At most one column per
/// position; iteration order is unspecified and the columns are visually
/// independent, so nothing relies on it.
#[derive(Default)]
pub struct Registry {
    columns: HashMap<u16, Column>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn contains(&self, position: u16) -> bool {
        self.columns.contains_key(&position)
    }

    /// Number of occupied positions inside the given width. After a shrink
    /// the registry can briefly hold columns parked beyond it; those must
    /// not count against spawn room.
    pub fn occupied_below(&self, width: u16) -> usize {
        self.columns.keys().filter(|&&x| x < width).count()
    }

    /// No-op returning `false` when the position is already occupied; the
    /// caller redraws a position and retries.
    pub fn insert(&mut self, column: Column) -> bool {
        let position = column.position();
        if self.columns.contains_key(&position) {
            return false;
        }
        self.columns.insert(position, column);
        true
    }

    /// Step every column and drop the ones that report finished.
    pub fn step_all(
        &mut self,
        term: &mut impl Renderer,
        glyphs: GlyphSet,
        rng: &mut impl Rng,
    ) -> Result<()> {
        let mut finished = Vec::new();
        for (&position, column) in &mut self.columns {
            if !column.step(term, glyphs, rng)? {
                finished.push(position);
            }
        }
        for position in finished {
            self.columns.remove(&position);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::terminal::FakeRenderer;

    #[test]
    fn second_column_at_the_same_position_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut reg = Registry::new();
        assert!(reg.insert(Column::new(5, 10, &mut rng)));
        assert!(!reg.insert(Column::new(5, 10, &mut rng)));
        assert_eq!(reg.len(), 1);
        assert!(reg.contains(5));
    }

    #[test]
    fn occupied_below_ignores_positions_beyond_the_width() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut reg = Registry::new();
        for x in [1, 5, 9] {
            reg.insert(Column::new(x, 10, &mut rng));
        }
        assert_eq!(reg.occupied_below(4), 1);
        assert_eq!(reg.occupied_below(10), 3);
        assert_eq!(reg.occupied_below(0), 0);
    }

    #[test]
    fn step_all_removes_finished_columns() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut term = FakeRenderer::new(20, 4);
        let mut reg = Registry::new();
        reg.insert(Column::new(0, 4, &mut rng));
        reg.insert(Column::new(7, 4, &mut rng));
        for _ in 0..100 {
            reg.step_all(&mut term, GlyphSet::Bin, &mut rng).unwrap();
            if reg.is_empty() {
                return;
            }
        }
        panic!("columns never finished");
    }
}
