//! Floor domain: minimap tiles mirroring room state.

use bevy::prelude::*;

use crate::rooms::RoomState;

/// Index of a tile in the minimap. Rooms hold this rather than the tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileId(usize);

#[derive(Debug, Clone, PartialEq)]
pub struct MinimapTile {
    pub coord: IVec2,
    display: RoomState,
}

impl MinimapTile {
    pub fn display(&self) -> RoomState {
        self.display
    }
}

/// Overview map. Tiles only ever receive pushes; they never change room state.
#[derive(Resource, Debug, Default)]
pub struct Minimap {
    tiles: Vec<MinimapTile>,
}

impl Minimap {
    pub fn add_tile(&mut self, coord: IVec2) -> TileId {
        self.tiles.push(MinimapTile {
            coord,
            display: RoomState::Unknown,
        });
        TileId(self.tiles.len() - 1)
    }

    /// Overwrites the tile's display. Any value is accepted, including
    /// `Current`, which rooms never persist.
    pub fn set_state(&mut self, tile: TileId, state: RoomState) {
        if let Some(entry) = self.tiles.get_mut(tile.0) {
            entry.display = state;
        }
    }

    pub fn display(&self, tile: TileId) -> Option<RoomState> {
        self.tiles.get(tile.0).map(MinimapTile::display)
    }

    pub fn tile(&self, tile: TileId) -> Option<&MinimapTile> {
        self.tiles.get(tile.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TileId, &MinimapTile)> {
        self.tiles
            .iter()
            .enumerate()
            .map(|(index, tile)| (TileId(index), tile))
    }

    /// The tile bounds of the laid-out rooms, for positioning the overview.
    pub fn bounds(&self) -> Option<(IVec2, IVec2)> {
        let first = self.tiles.first()?.coord;
        Some(self.tiles.iter().fold((first, first), |(min, max), tile| {
            (min.min(tile.coord), max.max(tile.coord))
        }))
    }
}
