//! Text layouts of a board, for tests, fixtures and debugging.
//!
//! One line per row, **top row first**. Whitespace inside a line is ignored.
//!
//! | symbol | piece |
//! |---|---|
//! | `B` `G` `R` `P` `Y` | regular blue, green, red, purple, yellow |
//! | `*` | generic bomb |
//! | `b` `g` `r` `p` `y` | bomb of that color |
//! | `.` | empty cell |

use crate::error::LayoutError;
use crate::grid::Grid;
use crate::types::{BombColor, PieceColor, PieceKind, Position};

/// A parsed layout, addressed like the grid (row 0 at the bottom).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    width: usize,
    height: usize,
    cells: Vec<Option<PieceKind>>,
}

impl Layout {
    /// Parse `text`; bombs get `blast_radius`.
    pub fn parse(text: &str, blast_radius: u8) -> Result<Self, LayoutError> {
        let rows: Vec<Vec<char>> = text
            .lines()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();

        let Some(first) = rows.first() else {
            return Err(LayoutError::Empty);
        };
        let width = first.len();
        let height = rows.len();

        let mut cells = vec![None; width * height];
        for (row, symbols) in rows.iter().enumerate() {
            if symbols.len() != width {
                return Err(LayoutError::RaggedRow {
                    row,
                    found: symbols.len(),
                    expected: width,
                });
            }
            let y = height - 1 - row;
            for (column, &symbol) in symbols.iter().enumerate() {
                let kind = match symbol {
                    '.' => None,
                    other => Some(kind_from_symbol(other, blast_radius).ok_or(
                        LayoutError::UnknownSymbol {
                            symbol: other,
                            row,
                            column,
                        },
                    )?),
                };
                cells[y * width + column] = kind;
            }
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, pos: Position) -> Option<PieceKind> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        let (x, y) = (pos.x as usize, pos.y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells[y * self.width + x]
    }

    /// Occupied cells with their kinds, column by column, bottom to top.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, PieceKind)> + '_ {
        (0..self.width).flat_map(move |x| {
            (0..self.height).filter_map(move |y| {
                let pos = Position::new(x as i8, y as i8);
                self.get(pos).map(|kind| (pos, kind))
            })
        })
    }
}

fn color_from_letter(letter: char) -> Option<PieceColor> {
    match letter.to_ascii_uppercase() {
        'B' => Some(PieceColor::Blue),
        'G' => Some(PieceColor::Green),
        'R' => Some(PieceColor::Red),
        'P' => Some(PieceColor::Purple),
        'Y' => Some(PieceColor::Yellow),
        _ => None,
    }
}

fn kind_from_symbol(symbol: char, blast_radius: u8) -> Option<PieceKind> {
    if symbol == '*' {
        return Some(PieceKind::Bomb {
            color: BombColor::Any,
            blast_radius,
        });
    }
    let color = color_from_letter(symbol)?;
    if symbol.is_ascii_uppercase() {
        Some(PieceKind::Regular { color })
    } else {
        Some(PieceKind::Bomb {
            color: BombColor::Color(color),
            blast_radius,
        })
    }
}

/// Layout symbol for a piece kind.
pub fn symbol(kind: &PieceKind) -> char {
    let letter = |color: PieceColor| match color {
        PieceColor::Blue => 'B',
        PieceColor::Green => 'G',
        PieceColor::Red => 'R',
        PieceColor::Purple => 'P',
        PieceColor::Yellow => 'Y',
    };
    match kind {
        PieceKind::Regular { color } => letter(*color),
        PieceKind::Bomb {
            color: BombColor::Any,
            ..
        } => '*',
        PieceKind::Bomb {
            color: BombColor::Color(color),
            ..
        } => letter(*color).to_ascii_lowercase(),
    }
}

/// Render a grid in layout notation (top row first).
pub fn render(grid: &Grid) -> String {
    let mut out = String::new();
    for y in (0..grid.height() as i8).rev() {
        for x in 0..grid.width() as i8 {
            let ch = grid
                .get(Position::new(x, y))
                .map_or('.', |piece| symbol(&piece.kind));
            out.push(ch);
        }
        out.push('\n');
    }
    out
}
