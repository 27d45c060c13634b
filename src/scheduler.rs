// Copyright (c) 2026 glyphrain contributors

use std::io::Result;
use std::time::{Duration, Instant};

use crossterm::event::KeyCode;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::column::Column;
use crate::glyph::GlyphSet;
use crate::registry::Registry;
use crate::terminal::Renderer;

pub const DEFAULT_MAX_COLUMNS: usize = 64;
pub const DEFAULT_FRAME_WAIT_MS: u64 = 100;

/// Chance per frame of a new column appearing while below the cap.
const SPAWN_CHANCE: f64 = 0.5;

/// The engine context: owns the registry, the RNG and the loop state, and
/// drives one frame after another against the renderer.
pub struct Scheduler {
    registry: Registry,
    rng: StdRng,
    glyphs: GlyphSet,
    max_columns: usize,
    frame_wait: Duration,
    last_width: Option<u16>,
    last_height: Option<u16>,
    running: bool,
}

impl Scheduler {
    pub fn new(glyphs: GlyphSet, max_columns: usize, frame_wait: Duration) -> Self {
        Self::with_rng(glyphs, max_columns, frame_wait, StdRng::from_os_rng())
    }

    pub fn with_rng(
        glyphs: GlyphSet,
        max_columns: usize,
        frame_wait: Duration,
        rng: StdRng,
    ) -> Self {
        Self {
            registry: Registry::new(),
            rng,
            glyphs,
            max_columns,
            frame_wait,
            last_width: None,
            last_height: None,
            running: false,
        }
    }

    /// Animate until the exit key arrives. The wait between frames doubles
    /// as the key poll, so exit latency is bounded by `frame_wait`.
    pub fn run(&mut self, term: &mut impl Renderer) -> Result<()> {
        self.running = true;
        while self.running {
            self.tick(term)?;
            self.pace(term)?;
        }
        Ok(())
    }

    /// One frame: resize check, spawn phase, step phase, flush.
    pub fn tick(&mut self, term: &mut impl Renderer) -> Result<()> {
        let (width, height) = term.size();
        if self.last_width != Some(width) || self.last_height != Some(height) {
            // Existing columns are left alone; their own bounds checks keep
            // out-of-range paints from landing.
            term.clear()?;
            self.last_width = Some(width);
            self.last_height = Some(height);
        }

        self.spawn(width, height);
        self.registry.step_all(term, self.glyphs, &mut self.rng)?;
        term.present()
    }

    fn spawn(&mut self, width: u16, height: u16) {
        if self.registry.len() >= self.max_columns {
            return;
        }
        if self.rng.random::<f64>() >= SPAWN_CHANCE {
            return;
        }
        // With every in-range position occupied the retry loop below would
        // spin forever on a narrow terminal. Columns parked beyond the
        // width by a shrink do not take up spawn room.
        if width == 0 || self.registry.occupied_below(width) >= width as usize {
            return;
        }

        let mut x = self.rng.random_range(0..width);
        while self.registry.contains(x) {
            x = self.rng.random_range(0..width);
        }
        self.registry.insert(Column::new(x, height, &mut self.rng));
    }

    fn pace(&mut self, term: &mut impl Renderer) -> Result<()> {
        let deadline = Instant::now() + self.frame_wait;
        loop {
            let now = Instant::now();
            if now >= deadline {
                return Ok(());
            }
            if let Some(key) = term.poll_key(deadline - now)? {
                if matches!(key, KeyCode::Esc | KeyCode::Char('q')) {
                    self.running = false;
                }
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn registry(&self) -> &Registry {
        &self.registry
    }

    #[cfg(test)]
    pub(crate) fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }
}
