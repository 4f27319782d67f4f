use core::fmt::{self, Display, Formatter};
use core::time::Duration;

use strum::EnumIter;
use thiserror::Error;

pub const TILE_COUNT: usize = 3;

pub type TileId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, strum::Display)]
pub enum XPos {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, strum::Display)]
pub enum YPos {
    Top,
    Bottom,
}

impl YPos {
    pub const fn flipped(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
        }
    }
}

/// One of the four cells of the 2x2 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: XPos,
    pub y: YPos,
}

impl Cell {
    pub const fn new(x: XPos, y: YPos) -> Self {
        Self { x, y }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub id: TileId,
    pub cell: Cell,
    /// Wait before the tile starts moving to its cell.
    pub delay: Duration,
    /// Wait before the tile starts growing or shrinking.
    pub expand_delay: Duration,
}

impl Tile {
    pub const fn new(id: TileId, cell: Cell) -> Self {
        Self {
            id,
            cell,
            delay: Duration::ZERO,
            expand_delay: Duration::ZERO,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("No tile with id {0}")]
    UnknownTile(TileId),

    #[error("More than one tile has id {0}")]
    DuplicateTile(TileId),

    #[error("Tiles {first} and {second} both occupy {cell}")]
    OverlappingTiles {
        first: TileId,
        second: TileId,
        cell: Cell,
    },

    #[error("Active tile {id} sits at {cell}, expected the left column")]
    ActiveNotPinnedLeft { id: TileId, cell: Cell },

    #[error("Tile {id} shares row {row} with the expanded tile")]
    ActiveRowShared { id: TileId, row: YPos },

    #[error("Retiling after a click on tile {clicked} broke the layout: {source}")]
    InvariantViolation {
        clicked: TileId,
        #[source]
        source: Box<LayoutError>,
    },
}

/// New cell and animation delays of `tile` once the tile sitting at `target` is clicked.
///
/// `stagger` is the base delay unit, moves are ordered as multiples of it so that no two
/// tiles cross each other mid-flight.
pub fn retile(tile: Tile, target: Cell, stagger: Duration) -> Tile {
    let target_on_left = target.x == XPos::Left;
    match (tile.cell.x == target.x, tile.cell.y == target.y) {
        // The clicked tile expands from the left column of its own row
        (true, true) => {
            let delay = if target_on_left {
                stagger * 2
            } else {
                stagger * 3
            };
            Tile {
                cell: Cell::new(XPos::Left, tile.cell.y),
                delay,
                expand_delay: delay,
                ..tile
            }
        }
        (true, false) => Tile {
            delay: Duration::ZERO,
            expand_delay: Duration::ZERO,
            ..tile
        },
        // Only the expanded tile can share the target's row, it gives the row up
        (false, true) => Tile {
            cell: Cell::new(tile.cell.x, tile.cell.y.flipped()),
            delay: if target_on_left { stagger } else { stagger * 2 },
            expand_delay: Duration::ZERO,
            ..tile
        },
        (false, false) => Tile {
            cell: Cell::new(XPos::Right, tile.cell.y),
            delay: stagger,
            expand_delay: Duration::ZERO,
            ..tile
        },
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Click {
    /// The clicked tile was already expanded.
    Unchanged,
    Retiled(TileGrid),
}

/// Three tiles laid out on a 2x2 grid, one of them expanded over its whole row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    tiles: [Tile; TILE_COUNT],
    active: TileId,
}

impl Default for TileGrid {
    fn default() -> Self {
        Self {
            tiles: [
                Tile::new(0, Cell::new(XPos::Left, YPos::Top)),
                Tile::new(1, Cell::new(XPos::Left, YPos::Bottom)),
                Tile::new(2, Cell::new(XPos::Right, YPos::Bottom)),
            ],
            active: 0,
        }
    }
}

impl TileGrid {
    pub fn new(tiles: [Tile; TILE_COUNT], active: TileId) -> Result<Self, LayoutError> {
        let grid = Self { tiles, active };
        grid.validate()?;
        Ok(grid)
    }

    pub const fn tiles(&self) -> &[Tile; TILE_COUNT] {
        &self.tiles
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.iter().find(|tile| tile.id == id)
    }

    pub const fn active(&self) -> TileId {
        self.active
    }

    pub const fn is_active(&self, id: TileId) -> bool {
        self.active == id
    }

    fn active_tile(&self) -> Result<&Tile, LayoutError> {
        self.tile(self.active)
            .ok_or(LayoutError::UnknownTile(self.active))
    }

    fn validate(&self) -> Result<(), LayoutError> {
        for (i, first) in self.tiles.iter().enumerate() {
            for second in self.tiles.iter().skip(i + 1) {
                if first.id == second.id {
                    return Err(LayoutError::DuplicateTile(first.id));
                }
                if first.cell == second.cell {
                    return Err(LayoutError::OverlappingTiles {
                        first: first.id,
                        second: second.id,
                        cell: first.cell,
                    });
                }
            }
        }

        let active = self.active_tile()?;
        if active.cell.x != XPos::Left {
            return Err(LayoutError::ActiveNotPinnedLeft {
                id: active.id,
                cell: active.cell,
            });
        }
        if let Some(other) = self
            .tiles
            .iter()
            .find(|tile| tile.id != active.id && tile.cell.y == active.cell.y)
        {
            return Err(LayoutError::ActiveRowShared {
                id: other.id,
                row: other.cell.y,
            });
        }
        Ok(())
    }

    /// Expands tile `id`, moving the others out of its way.
    ///
    /// The grid itself is never modified: the caller commits the returned layout.
    pub fn click(&self, id: TileId, stagger: Duration) -> Result<Click, LayoutError> {
        let clicked = self.tile(id).ok_or(LayoutError::UnknownTile(id))?;
        if clicked.cell.y == self.active_tile()?.cell.y {
            return Ok(Click::Unchanged);
        }

        let target = clicked.cell;
        let retiled = Self {
            tiles: self.tiles.map(|tile| retile(tile, target, stagger)),
            active: id,
        };
        retiled
            .validate()
            .map_err(|source| LayoutError::InvariantViolation {
                clicked: id,
                source: Box::new(source),
            })?;
        Ok(Click::Retiled(retiled))
    }

    /// Every layout the grid can be in: which tile is expanded, on which row, and how the
    /// other two share the remaining row.
    pub fn valid_states() -> Vec<Self> {
        let mut states = Vec::with_capacity(12);
        for row in [YPos::Top, YPos::Bottom] {
            for active in 0..TILE_COUNT {
                for below in (0..TILE_COUNT).filter(|&id| id != active) {
                    let beside = TILE_COUNT * (TILE_COUNT - 1) / 2 - active - below;
                    let mut tiles = [
                        Tile::new(active, Cell::new(XPos::Left, row)),
                        Tile::new(below, Cell::new(XPos::Left, row.flipped())),
                        Tile::new(beside, Cell::new(XPos::Right, row.flipped())),
                    ];
                    tiles.sort_by_key(|tile| tile.id);
                    states.push(Self { tiles, active });
                }
            }
        }
        states
    }
}
