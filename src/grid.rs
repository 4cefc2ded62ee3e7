use crate::error::GridError;
use rand::Rng;
use std::fmt;
use std::fmt::Write as _;
use std::path::Path as FsPath;
use std::str::FromStr;

/// Terrain code stored in each cell.
pub type Terrain = i32;

/// Terrain code of an impassable cell.
pub const WALL: Terrain = 1;

/// Terrain code of an ordinary floor cell.
pub const FLOOR: Terrain = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Applies a move delta. `None` when the result would be negative.
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Position> {
        Some(Position {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        })
    }

    /// True when `other` is one of the 8 cells surrounding `self`.
    pub fn is_adjacent(&self, other: &Position) -> bool {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        dr <= 1 && dc <= 1 && (dr, dc) != (0, 0)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Position { row, col }
    }
}

/// Parses `"row,col"`, as accepted on the command line.
impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, col) = s
            .split_once(',')
            .ok_or_else(|| format!("expected ROW,COL, got {:?}", s))?;
        let row = row
            .trim()
            .parse()
            .map_err(|e| format!("invalid row {:?}: {}", row, e))?;
        let col = col
            .trim()
            .parse()
            .map_err(|e| format!("invalid column {:?}: {}", col, e))?;
        Ok(Position { row, col })
    }
}

/// Immutable 2D terrain grid, indexed `[row][col]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<Terrain>>,
}

impl Grid {
    /// Builds a grid from rows of terrain codes. Every row must have the same
    /// non-zero length.
    pub fn new(cells: Vec<Vec<Terrain>>) -> Result<Self, GridError> {
        let rows = cells.len();
        let cols = cells.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty);
        }
        if let Some((row, found)) = cells
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != cols)
        {
            return Err(GridError::Ragged {
                row,
                expected: cols,
                found,
            });
        }
        Ok(Grid { rows, cols, cells })
    }

    /// A grid of the given size with every cell set to `FLOOR`.
    ///
    /// Unlike `new` this accepts a zero dimension. The result has no cells, so
    /// every query on it fails with `StartOutOfBounds`.
    pub fn open(rows: usize, cols: usize) -> Self {
        Grid {
            rows,
            cols,
            cells: vec![vec![FLOOR; cols]; rows],
        }
    }

    /// The 10x10 maze used by the demos.
    pub fn demo_maze() -> Self {
        let cells = vec![
            vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            vec![0, 1, 1, 0, 1, 1, 1, 1, 1, 0],
            vec![0, 1, 0, 0, 0, 0, 0, 0, 1, 0],
            vec![0, 1, 0, 1, 1, 1, 1, 0, 1, 0],
            vec![0, 0, 0, 0, 0, 0, 1, 0, 1, 0],
            vec![0, 1, 1, 1, 1, 0, 1, 0, 1, 0],
            vec![0, 1, 0, 0, 0, 0, 1, 0, 1, 0],
            vec![0, 1, 0, 1, 1, 1, 1, 0, 1, 0],
            vec![0, 1, 0, 0, 0, 0, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        ];
        Grid {
            rows: 10,
            cols: 10,
            cells,
        }
    }

    /// Random grid with up to `num_walls` walls. Cells in `keep_clear` never
    /// receive a wall. `num_walls` is capped at the cell count, and placement
    /// gives up after three attempts per wall, so crowded grids may end up
    /// with fewer walls.
    pub fn random<R: Rng>(
        rows: usize,
        cols: usize,
        num_walls: usize,
        rng: &mut R,
        keep_clear: &[Position],
    ) -> Self {
        let mut grid = Grid::open(rows, cols);
        if rows == 0 || cols == 0 {
            return grid;
        }

        let num_walls = num_walls.min(rows.saturating_mul(cols));
        let mut walls_placed = 0;
        let mut attempts = 0;
        while walls_placed < num_walls && attempts < num_walls.saturating_mul(3) {
            let pos = Position::new(rng.gen_range(0..rows), rng.gen_range(0..cols));

            if !keep_clear.contains(&pos) && grid.cells[pos.row][pos.col] == FLOOR {
                grid.cells[pos.row][pos.col] = WALL;
                walls_placed += 1;
            }
            attempts += 1;
        }
        grid
    }

    /// Parses a text map.
    ///
    /// One row per line. A line is either whitespace-separated integers
    /// (`0 1 0 2`) or one character per cell, where `#` is a wall, `.` is
    /// floor and a digit is its own terrain code. Blank lines and lines
    /// starting with `;` are skipped.
    pub fn parse(text: &str) -> Result<Self, GridError> {
        let mut cells = Vec::new();

        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(';') {
                continue;
            }

            let row = if line.contains(char::is_whitespace) {
                line.split_whitespace()
                    .map(|token| {
                        token.parse::<Terrain>().map_err(|_| GridError::Parse {
                            line: idx + 1,
                            token: token.to_string(),
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?
            } else {
                line.chars()
                    .map(|c| match c {
                        '#' => Ok(WALL),
                        '.' => Ok(FLOOR),
                        _ => c
                            .to_digit(10)
                            .map(|d| d as Terrain)
                            .ok_or_else(|| GridError::Parse {
                                line: idx + 1,
                                token: c.to_string(),
                            }),
                    })
                    .collect::<Result<Vec<_>, _>>()?
            };
            cells.push(row);
        }

        Grid::new(cells)
    }

    /// Reads and parses a map file.
    pub fn load(path: impl AsRef<FsPath>) -> Result<Self, GridError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| GridError::Map {
            path: path.to_path_buf(),
            source,
        })?;
        Grid::parse(&text)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Terrain code at `pos`, or `None` outside the grid.
    pub fn terrain(&self, pos: Position) -> Option<Terrain> {
        self.cells.get(pos.row)?.get(pos.col).copied()
    }

    pub fn is_wall(&self, pos: Position) -> bool {
        self.terrain(pos) == Some(WALL)
    }

    /// Number of wall cells.
    pub fn wall_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&code| code == WALL)
            .count()
    }

    /// Draws the grid as text.
    ///
    /// Agents are drawn with the last digit of their id and take precedence
    /// over the target (`T`), the path start (`S`) and path cells (`*`).
    pub fn render(
        &self,
        path: &[Position],
        agents: &[(usize, Position)],
        target: Option<Position>,
    ) -> String {
        let mut out = String::new();
        out.push_str("Legend: S=Start, T=Target, *=Path, #=Wall, .=Empty, 0-9=Agent\n");

        out.push_str("   ");
        for col in 0..self.cols {
            let _ = write!(out, "{:2}", col % 10);
        }
        out.push('\n');

        for row in 0..self.rows {
            let _ = write!(out, "{:2} ", row);

            for col in 0..self.cols {
                let pos = Position::new(row, col);
                let ch = if let Some((id, _)) = agents.iter().find(|(_, p)| *p == pos) {
                    char::from_digit((id % 10) as u32, 10).unwrap_or('A')
                } else if Some(pos) == target {
                    'T'
                } else if path.first() == Some(&pos) {
                    'S'
                } else if path.last() == Some(&pos) {
                    'T'
                } else if path.contains(&pos) {
                    '*'
                } else if self.cells[row][col] == WALL {
                    '#'
                } else {
                    '.'
                };
                out.push(ch);
                out.push(' ');
            }
            out.push('\n');
        }
        out
    }

    /// Print a visual representation of the grid.
    pub fn print_grid(
        &self,
        path: &[Position],
        agents: &[(usize, Position)],
        target: Option<Position>,
    ) {
        println!("{}", self.render(path, agents, target));
    }
}
