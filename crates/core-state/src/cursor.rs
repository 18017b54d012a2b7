//! Screen-relative cursor and the bounds it is clamped to.
//!
//! The cursor is never allowed outside `[0, rows) x [0, cols)`. Every mutator
//! clamps explicitly; the render layer can rely on receiving only valid
//! coordinates.

/// Visible screen region in terminal cells. Both dimensions are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSize {
    rows: u16,
    cols: u16,
}

impl ScreenSize {
    pub fn new(rows: u16, cols: u16) -> Self {
        Self {
            rows: rows.max(1),
            cols: cols.max(1),
        }
    }

    /// Build from crossterm's `(columns, rows)` ordering.
    pub fn from_terminal((cols, rows): (u16, u16)) -> Self {
        Self::new(rows, cols)
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn last_row(&self) -> u16 {
        self.rows - 1
    }

    pub fn last_col(&self) -> u16 {
        self.cols - 1
    }
}

impl Default for ScreenSize {
    fn default() -> Self {
        Self::new(24, 80)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub row: u16,
    pub col: u16,
}

impl Cursor {
    pub const fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }

    pub const fn origin() -> Self {
        Self { row: 0, col: 0 }
    }

    /// Pull the cursor back inside `size`. Returns `true` if it moved.
    pub fn clamp_to(&mut self, size: ScreenSize) -> bool {
        let before = *self;
        self.row = self.row.min(size.last_row());
        self.col = self.col.min(size.last_col());
        *self != before
    }

    /// Move one cell in `dir`. Returns `false` (and leaves the cursor alone)
    /// when the move would leave the screen.
    pub fn step(&mut self, dir: Direction, size: ScreenSize) -> bool {
        let next = match dir {
            Direction::Left => self.col.checked_sub(1).map(|col| Cursor::new(self.row, col)),
            Direction::Up => self.row.checked_sub(1).map(|row| Cursor::new(row, self.col)),
            Direction::Right => {
                (self.col < size.last_col()).then(|| Cursor::new(self.row, self.col + 1))
            }
            Direction::Down => {
                (self.row < size.last_row()).then(|| Cursor::new(self.row + 1, self.col))
            }
        };
        match next {
            Some(next) => {
                *self = next;
                true
            }
            None => false,
        }
    }

    /// Backspace motion: one column left, or the last column of the previous
    /// row when already at column 0. Stays put at the origin.
    pub fn retreat(&mut self, size: ScreenSize) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = size.last_col();
        }
    }

    /// Advance past a character just drawn at the cursor.
    ///
    /// Returns `true` when the cursor is pinned at the bottom-right cell,
    /// i.e. the character needed a row the screen does not have.
    pub fn advance(&mut self, ch: char, size: ScreenSize, tab_width: u16) -> bool {
        match ch {
            '\n' => self.next_line(size),
            '\r' => {
                self.col = 0;
                false
            }
            '\t' => {
                let tab_width = tab_width.max(1);
                let stop = (self.col / tab_width + 1).saturating_mul(tab_width);
                if stop <= size.last_col() {
                    self.col = stop;
                    false
                } else {
                    self.next_line(size)
                }
            }
            _ => {
                if self.col < size.last_col() {
                    self.col += 1;
                    false
                } else {
                    self.next_line(size)
                }
            }
        }
    }

    fn next_line(&mut self, size: ScreenSize) -> bool {
        if self.row < size.last_row() {
            self.row += 1;
            self.col = 0;
            false
        } else {
            self.row = size.last_row();
            self.col = size.last_col();
            true
        }
    }
}
