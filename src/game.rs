use core::ops::ControlFlow;

use rand::{rngs::SmallRng, SeedableRng};

use crate::backend::{Backend, Event, Key};
use crate::config::*;
use crate::grid::Grid;

/// The interactive Game of Life loop
///
/// Owns the grid and everything the user can change about it. Starts paused with every cell
/// dead, so the first thing to do is click some cells alive and unpause.
///
/// While paused, pointer presses toggle cells and `C`/`R` clear or randomize the grid. While
/// running, the grid advances one generation per tick and edits are ignored. `P` or `Space`
/// switch between the two; resizing and quitting work either way.
pub struct Game {
    grid: Grid,
    /// The next generation is written here, then swapped with `grid`
    spare: Grid,
    paused: bool,
    width: usize,
    height: usize,
    rng: SmallRng,
}

/// How many whole cells fit in a `width` x `height` pixel window
pub fn cells_for(width: usize, height: usize) -> (usize, usize) {
    (width / CELL_SIZE, height / CELL_SIZE)
}

impl Game {
    /// Creates a paused game for a `width` x `height` pixel window
    pub fn new(width: usize, height: usize) -> Self {
        let (cols, rows) = cells_for(width, height);

        Self {
            grid: Grid::new(cols, rows),
            spare: Grid::new(cols, rows),
            paused: true,
            width,
            height,
            rng: SmallRng::seed_from_u64(RNG_SEED),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Direct access for seeding patterns. Not gated on pause.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Window size in pixels, as of the last resize
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn title(&self) -> String {
        let state = if self.paused { "Paused" } else { "Running" };
        format!("{WINDOW_TITLE} ({state})")
    }

    /// Ticks until the backend reports a quit
    pub fn run(&mut self, backend: &mut impl Backend) {
        log::info!(
            "Starting a {}x{} grid ({}x{} pixels), paused",
            self.grid.cols(),
            self.grid.rows(),
            self.width,
            self.height
        );
        backend.set_title(&self.title());

        while self.tick(backend).is_continue() {}

        log::info!("Quitting with {} live cells", self.grid.population());
    }

    /// Runs one iteration of the loop
    ///
    /// Draws the current generation, advances it if running, presents, waits out the rest of the
    /// tick, and then applies all pending input. A quit stops input handling right away and
    /// returns [`ControlFlow::Break`].
    pub fn tick(&mut self, backend: &mut impl Backend) -> ControlFlow<()> {
        self.render(backend);

        if self.paused {
            backend.draw_text_centered(
                PAUSED_LABEL,
                self.width as i32 - PAUSED_LABEL_INSET_X,
                self.height as i32 - PAUSED_LABEL_INSET_Y,
                LIVE_COLOR,
            );
        } else {
            self.advance();
        }

        // A dropped frame isn't worth stopping for
        if let Err(err) = backend.present() {
            log::error!("Failed to present a frame: {err}");
        }

        backend.wait_for_tick();

        for event in backend.poll_events() {
            if self.handle_event(event, backend).is_break() {
                return ControlFlow::Break(());
            }
        }

        ControlFlow::Continue(())
    }

    fn render(&self, backend: &mut impl Backend) {
        backend.clear(BACKGROUND_COLOR);

        let size = CELL_SIZE as u32;
        for (x, y) in self.grid.live_cells() {
            let px = (x * CELL_SIZE) as i32;
            let py = (y * CELL_SIZE) as i32;
            backend.fill_rect(px, py, size, size, LIVE_COLOR);
        }
    }

    fn advance(&mut self) {
        if self.grid.is_empty() {
            return;
        }

        let updated = self.grid.step_into(&mut self.spare);
        core::mem::swap(&mut self.grid, &mut self.spare);

        log::trace!(
            "Stepped: {updated} cells changed, {} alive",
            self.grid.population()
        );
    }

    /// Applies one input event
    pub fn handle_event(&mut self, event: Event, backend: &mut impl Backend) -> ControlFlow<()> {
        match event {
            Event::Quit | Event::KeyDown(Key::Escape | Key::Q) => {
                log::debug!("Quit requested");
                return ControlFlow::Break(());
            }

            Event::KeyDown(Key::P | Key::Space) => {
                self.paused ^= true;
                log::debug!("{}", if self.paused { "Paused" } else { "Running" });
                backend.set_title(&self.title());
            }

            Event::KeyDown(Key::C) if self.paused => {
                self.grid.clear();
                log::debug!("Cleared the grid");
            }

            Event::KeyDown(Key::R) if self.paused => {
                self.grid.randomize(&mut self.rng);
                log::debug!("Randomized the grid: {} alive", self.grid.population());
            }

            Event::KeyDown(_) => {}

            Event::PointerDown { x, y } => self.edit_at(x, y),

            Event::WindowResized { width, height } => self.resize(width, height, backend),
        }

        ControlFlow::Continue(())
    }

    /// Toggles the cell under pixel `(px, py)`
    fn edit_at(&mut self, px: i32, py: i32) {
        if !self.paused {
            log::trace!("Ignoring a press at ({px}, {py}) while running");
            return;
        }

        // Floor division, so presses left of or above the grid stay negative
        let x = px.div_euclid(CELL_SIZE as i32);
        let y = py.div_euclid(CELL_SIZE as i32);

        // The window can be a partial cell wider or taller than the grid
        if !self.grid.contains(x, y) {
            log::warn!("Ignoring a press at ({px}, {py}), it's outside of the grid");
            return;
        }

        let was_alive = self.grid.toggle(x as usize, y as usize);
        log::debug!(
            "Toggled ({x}, {y}) {}",
            if was_alive { "dead" } else { "alive" }
        );
    }

    fn resize(&mut self, width: usize, height: usize, backend: &mut impl Backend) {
        let (cols, rows) = cells_for(width, height);
        log::debug!(
            "Resized to {width}x{height} pixels: {}x{} -> {cols}x{rows} cells",
            self.grid.cols(),
            self.grid.rows()
        );

        backend.resize(width, height);
        self.width = width;
        self.height = height;

        self.grid = self.grid.resized(cols, rows);
        self.spare = Grid::new(cols, rows);
    }
}
