use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

pub const EMPTY_GLYPH: char = '.';
pub const WALL_GLYPH: char = '#';
pub const PLAYER_GLYPH: char = '@';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellKind {
    #[default]
    Empty,
    Wall,
    /// Start cell in source text; the live player marker inside derived grids.
    PlayerStart,
}

impl CellKind {
    /// Unknown glyphs decode as `Empty`.
    pub fn from_glyph(glyph: char) -> Self {
        match glyph {
            WALL_GLYPH => CellKind::Wall,
            PLAYER_GLYPH => CellKind::PlayerStart,
            _ => CellKind::Empty,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            CellKind::Empty => EMPTY_GLYPH,
            CellKind::Wall => WALL_GLYPH,
            CellKind::PlayerStart => PLAYER_GLYPH,
        }
    }

    pub fn is_walkable(self) -> bool {
        !matches!(self, CellKind::Wall)
    }
}

impl From<CellKind> for char {
    fn from(kind: CellKind) -> Self {
        kind.glyph()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level text contains no cells")]
    Malformed,
    #[error("level has no player start marker '{PLAYER_GLYPH}'")]
    NoPlayerStart,
    #[error("position ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },
    #[error("failed to read level file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Rectangular grid of cells, row-major, `rows[y][x]`.
///
/// Invariant: at least one row, at least one column, and every row has the
/// same length. All mutators preserve the shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LevelGrid {
    rows: Vec<Vec<CellKind>>,
}

impl LevelGrid {
    /// Parses `.`/`#`/`@` level text. Short lines are right-padded with
    /// `Empty` up to the longest line.
    pub fn parse(raw: &str) -> Result<Self, LevelError> {
        let lines = raw
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect::<Vec<_>>();
        let width = lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        if width == 0 {
            return Err(LevelError::Malformed);
        }

        let rows = lines
            .iter()
            .map(|line| {
                let mut row = line.chars().map(CellKind::from_glyph).collect::<Vec<_>>();
                row.resize(width, CellKind::Empty);
                row
            })
            .collect();
        Ok(Self { rows })
    }

    pub fn width(&self) -> usize {
        self.rows[0].len()
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<CellKind>] {
        &self.rows
    }

    pub fn contains(&self, pos: GridPos) -> bool {
        self.index_of(pos).is_some()
    }

    pub fn cell_at(&self, pos: GridPos) -> Result<CellKind, LevelError> {
        let (x, y) = self.checked_index(pos)?;
        Ok(self.rows[y][x])
    }

    pub fn set_cell(&mut self, pos: GridPos, kind: CellKind) -> Result<(), LevelError> {
        let (x, y) = self.checked_index(pos)?;
        self.rows[y][x] = kind;
        Ok(())
    }

    /// First `PlayerStart` in row-major scan order.
    pub fn find_player_start(&self) -> Result<GridPos, LevelError> {
        self.cells()
            .find(|(_, kind)| *kind == CellKind::PlayerStart)
            .map(|(pos, _)| pos)
            .ok_or(LevelError::NoPlayerStart)
    }

    /// Copy of this grid with every marker cleared and a single marker at
    /// `pos`.
    pub fn with_player_at(&self, pos: GridPos) -> Result<Self, LevelError> {
        let (x, y) = self.checked_index(pos)?;
        let mut derived = self.clone();
        for cell in derived.rows.iter_mut().flatten() {
            if *cell == CellKind::PlayerStart {
                *cell = CellKind::Empty;
            }
        }
        derived.rows[y][x] = CellKind::PlayerStart;
        Ok(derived)
    }

    /// First row moves to the bottom.
    pub fn rotate_rows_up(&mut self) {
        self.rows.rotate_left(1);
    }

    /// Last row moves to the top.
    pub fn rotate_rows_down(&mut self) {
        self.rows.rotate_right(1);
    }

    /// First cell of every row moves to the end of that row.
    pub fn rotate_columns_left(&mut self) {
        for row in &mut self.rows {
            row.rotate_left(1);
        }
    }

    /// Last cell of every row moves to the front of that row.
    pub fn rotate_columns_right(&mut self) {
        for row in &mut self.rows {
            row.rotate_right(1);
        }
    }

    /// Iterates all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (GridPos, CellKind)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, kind)| (GridPos::new(x as i32, y as i32), *kind))
        })
    }

    fn index_of(&self, pos: GridPos) -> Option<(usize, usize)> {
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some((x, y))
    }

    fn checked_index(&self, pos: GridPos) -> Result<(usize, usize), LevelError> {
        self.index_of(pos).ok_or(LevelError::OutOfBounds {
            x: pos.x,
            y: pos.y,
            width: self.width(),
            height: self.height(),
        })
    }
}

impl fmt::Display for LevelGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, row) in self.rows.iter().enumerate() {
            if index > 0 {
                f.write_str("\n")?;
            }
            for cell in row {
                write!(f, "{}", cell.glyph())?;
            }
        }
        Ok(())
    }
}
