use core::fmt;
use core::str::FromStr;

use rand::RngCore;

use crate::Error;

/// A bounded, row-major grid of Conway's Game of Life cells
///
/// Cells outside the grid are permanently dead. There is no wraparound: a glider that walks off
/// an edge is gone.
///
/// `x` is the column (horizontal) coordinate and `y` is the row (vertical) coordinate. Both must
/// be in range for [`Grid::get()`], [`Grid::set()`], and [`Grid::toggle()`]; an out of range
/// coordinate is a bug in the caller and panics.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    cols: usize,
    rows: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Creates a `cols` x `rows` grid with every cell dead
    ///
    /// Either dimension may be zero. A zero sized grid is valid and simply has no cells to draw or
    /// update.
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![false; cols * rows],
        }
    }

    /// The number of columns (the horizontal size)
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// The number of rows (the vertical size)
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Whether the grid has no cells at all
    pub const fn is_empty(&self) -> bool {
        self.cols == 0 || self.rows == 0
    }

    /// Returns whether `(x, y)` names a cell inside this grid
    ///
    /// Takes signed coordinates so callers can ask about positions derived from pointer input
    /// before converting them.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.cols && (y as usize) < self.rows
    }

    #[track_caller]
    fn idx(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.cols && y < self.rows,
            "cell ({x}, {y}) is outside of the {}x{} grid",
            self.cols,
            self.rows
        );
        x + y * self.cols
    }

    /// Returns whether the cell at `(x, y)` is alive
    #[track_caller]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells[self.idx(x, y)]
    }

    /// Sets the cell at `(x, y)` to `alive`
    ///
    /// # Return Value
    /// Returns the previous state of the cell
    #[track_caller]
    pub fn set(&mut self, x: usize, y: usize, alive: bool) -> bool {
        let idx = self.idx(x, y);
        core::mem::replace(&mut self.cells[idx], alive)
    }

    /// Flips the cell at `(x, y)`
    ///
    /// This is logically equivalent to:
    /// ```rust
    /// # let mut grid = life_window::Grid::new(4, 4);
    /// # let (x, y) = (1, 2);
    /// let is_alive = grid.get(x, y);
    /// grid.set(x, y, !is_alive);
    /// ```
    ///
    /// # Return Value
    /// Returns the previous state of the cell
    #[track_caller]
    pub fn toggle(&mut self, x: usize, y: usize) -> bool {
        let idx = self.idx(x, y);
        let was_alive = self.cells[idx];
        self.cells[idx] = !was_alive;
        was_alive
    }

    /// Kills every cell
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Sets every cell to a coin flip from `rng`
    pub fn randomize(&mut self, rng: &mut impl RngCore) {
        for cell in &mut self.cells {
            *cell = rng.next_u32() % 2 == 0;
        }
    }

    /// The number of live cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|alive| **alive).count()
    }

    /// Iterates the `(x, y)` coordinates of every live cell, row by row
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(move |(idx, _)| (idx % cols, idx / cols))
    }

    /// Counts the live cells in the 3x3 block around `(x, y)`, not including `(x, y)` itself
    ///
    /// The block is clipped to the grid, so an edge cell only ever sees 5 neighbors and a corner
    /// cell only 3.
    #[track_caller]
    pub fn neighbor_count(&self, x: usize, y: usize) -> u8 {
        let center = self.get(x, y) as u8;

        let xs = x.saturating_sub(1)..usize::min(self.cols, x + 2);
        let ys = y.saturating_sub(1)..usize::min(self.rows, y + 2);

        let mut total = 0;
        for ny in ys {
            let row = &self.cells[ny * self.cols..][xs.clone()];
            total += row.iter().filter(|alive| **alive).count() as u8;
        }

        total - center
    }

    /// Computes the next generation into `next`
    ///
    /// Every cell of `next` is overwritten using only the state of `self`, so `next` can be a
    /// recycled buffer with stale contents. The two grids must have the same dimensions.
    ///
    /// This is the standard B3/S23 rule:
    /// - A live cell with 2 or 3 live neighbors survives, any other live cell dies
    /// - A dead cell with exactly 3 live neighbors is born, any other dead cell stays dead
    ///
    /// # Return Value
    /// Returns the number of cells that changed state
    #[track_caller]
    pub fn step_into(&self, next: &mut Grid) -> usize {
        assert_eq!(
            (self.cols, self.rows),
            (next.cols, next.rows),
            "step_into() needs a buffer with the same dimensions"
        );

        let mut updated = 0;
        for y in 0..self.rows {
            for x in 0..self.cols {
                let idx = x + y * self.cols;
                let alive = self.cells[idx];

                let next_alive = match (alive, self.neighbor_count(x, y)) {
                    (true, 2) | (true, 3) => true,
                    (false, 3) => true,
                    _ => false,
                };

                updated += (next_alive != alive) as usize;
                next.cells[idx] = next_alive;
            }
        }

        updated
    }

    /// Returns the next generation of this grid
    pub fn step(&self) -> Grid {
        let mut next = Grid::new(self.cols, self.rows);
        if !self.is_empty() {
            self.step_into(&mut next);
        }
        next
    }

    /// Returns a `new_cols` x `new_rows` copy of this grid
    ///
    /// The top-left overlap of the two sizes keeps its cells. Anything added by growing starts
    /// dead, and anything outside a shrunk size is dropped.
    pub fn resized(&self, new_cols: usize, new_rows: usize) -> Grid {
        let mut resized = Grid::new(new_cols, new_rows);

        let cols = usize::min(self.cols, new_cols);
        let rows = usize::min(self.rows, new_rows);
        for y in 0..rows {
            let src = &self.cells[y * self.cols..][..cols];
            resized.cells[y * new_cols..][..cols].copy_from_slice(src);
        }

        resized
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid {}x{}", self.cols, self.rows)?;
        fmt::Display::fmt(self, f)
    }
}

/// Draws the grid as lines of `#` (alive) and `.` (dead)
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.rows {
            for x in 0..self.cols {
                f.write_str(if self.get(x, y) { "#" } else { "." })?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

/// Parses a picture of a grid
///
/// Every non-blank line is one row. `#` and `O` are alive, `.` is dead. Leading and trailing
/// whitespace on each line is ignored, so pictures can be indented.
impl FromStr for Grid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cols = None;
        let mut rows = 0;
        let mut cells = vec![];

        for (line_idx, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let mut width = 0;
            for (column, c) in line.chars().enumerate() {
                let alive = match c {
                    '#' | 'O' => true,
                    '.' => false,
                    found => {
                        return Err(Error::ParseGrid {
                            line: line_idx + 1,
                            column: column + 1,
                            found,
                        })
                    }
                };
                cells.push(alive);
                width += 1;
            }

            match cols {
                None => cols = Some(width),
                Some(expected) if expected != width => {
                    return Err(Error::RaggedGrid {
                        line: line_idx + 1,
                        expected,
                        found: width,
                    })
                }
                Some(_) => {}
            }
            rows += 1;
        }

        Ok(Self {
            cols: cols.unwrap_or(0),
            rows,
            cells,
        })
    }
}

#[cfg(test)]
mod t {
    use super::*;

    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn grid(picture: &str) -> Grid {
        picture.parse().unwrap()
    }

    #[rstest]
    #[case(1, 1)]
    #[case(2, 1)]
    #[case(3, 1)]
    #[case(1, 2)]
    #[case(3, 2)]
    #[case(1, 3)]
    #[case(2, 3)]
    #[case(3, 3)]
    fn check_single_cell_is_seen_by_each_neighbor(#[case] x: usize, #[case] y: usize) {
        let mut life = Grid::new(5, 5);
        life.set(2, 2, true);

        assert_eq!(life.neighbor_count(x, y), 1);
    }

    #[test]
    fn check_single_cell_does_not_count_itself() {
        let mut life = Grid::new(5, 5);
        life.set(2, 2, true);

        assert_eq!(life.neighbor_count(2, 2), 0);
    }

    #[rstest]
    fn check_corner_cell_has_three_neighbors(
        #[values(2, 3, 7)] cols: usize,
        #[values(2, 4)] rows: usize,
    ) {
        let mut life = Grid::new(cols, rows);
        life.set(0, 0, true);

        let mut touched = vec![];
        for y in 0..rows {
            for x in 0..cols {
                if life.neighbor_count(x, y) == 1 {
                    touched.push((x, y));
                }
            }
        }

        assert_eq!(touched, vec![(1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn check_full_grid_neighbor_counts() {
        let life = grid(indoc! {"
            ###
            ###
            ###
        "});

        assert_eq!(life.neighbor_count(0, 0), 3);
        assert_eq!(life.neighbor_count(1, 0), 5);
        assert_eq!(life.neighbor_count(1, 1), 8);
        assert_eq!(life.neighbor_count(2, 2), 3);
    }

    #[rstest]
    fn check_block_is_a_still_life(#[values(1, 2, 3)] x: usize, #[values(1, 3)] y: usize) {
        let mut life = Grid::new(6, 6);
        life.set(x, y, true);
        life.set(x + 1, y, true);
        life.set(x, y + 1, true);
        life.set(x + 1, y + 1, true);

        assert_eq!(life.step(), life);
    }

    #[test]
    fn check_l_tromino_births_its_corner() {
        let life = grid(indoc! {"
            .#.
            ##.
            ...
        "});

        let next = life.step();

        assert!(!life.get(0, 0));
        assert_eq!(life.neighbor_count(0, 0), 3);
        assert!(next.get(0, 0));
    }

    /// Neighbors of (1, 1) on a 3x3 grid, in the order they're made alive
    const RING: [(usize, usize); 8] = [
        (0, 0),
        (1, 0),
        (2, 0),
        (2, 1),
        (2, 2),
        (1, 2),
        (0, 2),
        (0, 1),
    ];

    #[rstest]
    #[case(0, false)]
    #[case(1, false)]
    #[case(2, true)]
    #[case(3, true)]
    #[case(4, false)]
    #[case(5, false)]
    #[case(6, false)]
    #[case(7, false)]
    #[case(8, false)]
    fn check_live_cell_survival(#[case] neighbors: usize, #[case] survives: bool) {
        let mut life = Grid::new(3, 3);
        life.set(1, 1, true);
        for &(x, y) in &RING[..neighbors] {
            life.set(x, y, true);
        }
        assert_eq!(life.neighbor_count(1, 1) as usize, neighbors);

        assert_eq!(life.step().get(1, 1), survives);
    }

    #[rstest]
    #[case(2, false)]
    #[case(3, true)]
    #[case(4, false)]
    fn check_dead_cell_birth(#[case] neighbors: usize, #[case] born: bool) {
        let mut life = Grid::new(3, 3);
        for &(x, y) in &RING[..neighbors] {
            life.set(x, y, true);
        }

        assert_eq!(life.step().get(1, 1), born);
    }

    #[test]
    fn check_blinker_reads_only_the_previous_generation() {
        let horizontal = grid(indoc! {"
            .....
            .....
            .###.
            .....
            .....
        "});
        let vertical = grid(indoc! {"
            .....
            ..#..
            ..#..
            ..#..
            .....
        "});

        assert_eq!(horizontal.step(), vertical);
        assert_eq!(vertical.step(), horizontal);
    }

    #[test]
    fn check_step_into_reports_changes_and_overwrites_stale_buffer() {
        let blinker = grid(indoc! {"
            ...
            ###
            ...
        "});

        let mut next = grid(indoc! {"
            ###
            ###
            ###
        "});
        let updated = blinker.step_into(&mut next);

        assert_eq!(updated, 4);
        assert_eq!(
            next.to_string(),
            indoc! {"
                .#.
                .#.
                .#.
            "}
        );
    }

    #[rstest]
    #[case(0, 0)]
    #[case(0, 5)]
    #[case(5, 0)]
    fn check_empty_grid_steps_to_empty(#[case] cols: usize, #[case] rows: usize) {
        let life = Grid::new(cols, rows);
        let next = life.step();

        assert_eq!(next, life);
        assert_eq!(next.population(), 0);
    }

    #[test]
    fn check_resize_grow_keeps_overlap() {
        let life = grid(indoc! {"
            #..
            .##
        "});

        let bigger = life.resized(5, 4);

        assert_eq!(
            bigger.to_string(),
            indoc! {"
                #....
                .##..
                .....
                .....
            "}
        );
    }

    #[test]
    fn check_resize_shrink_truncates() {
        let life = grid(indoc! {"
            #.#.
            .###
            ##..
        "});

        let smaller = life.resized(3, 2);

        assert_eq!(
            smaller.to_string(),
            indoc! {"
                #.#
                .##
            "}
        );
    }

    #[test]
    fn check_resize_mixed_and_to_zero() {
        let life = grid(indoc! {"
            ##
            #.
            .#
        "});

        assert_eq!(
            life.resized(4, 1).to_string(),
            indoc! {"
                ##..
            "}
        );
        assert!(life.resized(0, 3).is_empty());
        assert_eq!(life.resized(0, 0).resized(2, 3), Grid::new(2, 3));

        // The source is left alone
        assert_eq!(life.population(), 4);
    }

    #[test]
    fn check_toggle_twice_restores() {
        let mut life = grid(indoc! {"
            #.
            .#
        "});
        let before = life.clone();

        for y in 0..2 {
            for x in 0..2 {
                let was_alive = life.toggle(x, y);
                assert_eq!(life.get(x, y), !was_alive);
                life.toggle(x, y);
            }
        }

        assert_eq!(life, before);
    }

    #[test]
    #[should_panic(expected = "outside of the 3x2 grid")]
    fn check_toggle_out_of_range_panics() {
        let mut life = Grid::new(3, 2);
        life.toggle(3, 0);
    }

    #[test]
    fn check_contains() {
        let life = Grid::new(3, 2);

        assert!(life.contains(0, 0));
        assert!(life.contains(2, 1));
        assert!(!life.contains(3, 1));
        assert!(!life.contains(2, 2));
        assert!(!life.contains(-1, 0));
        assert!(!Grid::new(0, 0).contains(0, 0));
    }

    #[test]
    fn check_live_cells_and_population() {
        let life = grid(indoc! {"
            .#.
            ..#
            ###
        "});

        assert_eq!(life.population(), 5);
        assert_eq!(
            life.live_cells().collect::<Vec<_>>(),
            vec![(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)]
        );
    }

    #[test]
    fn check_clear_and_randomize() {
        use rand::{rngs::SmallRng, SeedableRng};

        let mut life = Grid::new(16, 16);
        let mut rng = SmallRng::seed_from_u64(7);

        life.randomize(&mut rng);
        let population = life.population();
        assert!(population > 0 && population < 16 * 16, "{population}");

        life.clear();
        assert_eq!(life, Grid::new(16, 16));
    }

    #[test]
    fn check_parse_errors() {
        assert!(matches!(
            "..\n.x".parse::<Grid>(),
            Err(Error::ParseGrid {
                line: 2,
                column: 2,
                found: 'x'
            })
        ));
        assert!(matches!(
            "...\n..".parse::<Grid>(),
            Err(Error::RaggedGrid {
                line: 2,
                expected: 3,
                found: 2
            })
        ));
        assert_eq!("".parse::<Grid>().unwrap(), Grid::new(0, 0));
    }
}
