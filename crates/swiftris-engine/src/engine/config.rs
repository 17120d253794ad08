use serde::{Deserialize, Serialize};

use crate::core::{
    orientation::Orientation,
    shape::{ShapeKind, ShapeOffsets},
};

/// Why a [`GameConfig`] cannot be used to run a game.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("board must have at least one column and one row, got {columns}x{rows}")]
    EmptyBoard { columns: u16, rows: u16 },
    #[display("{kind:?} shape at {orientation} degrees does not fit the board at the spawn anchor")]
    SpawnOutOfBounds {
        kind: ShapeKind,
        orientation: Orientation,
    },
    #[display("preview anchor ({column}, {row}) puts shape blocks outside the coordinate range")]
    PreviewAnchorOverflow { column: i32, row: i32 },
    #[display("points per line must be positive")]
    ZeroPointsPerLine,
    #[display("level threshold must be positive")]
    ZeroLevelThreshold,
}

/// Board geometry and scoring constants.
///
/// The defaults are a 10×20 board, shapes spawning at column 4 of the top
/// row, the preview slot at `(12, 1)` (outside the board, to the right), 10
/// points per cleared line and a level-up every 500 points per level.
///
/// The preview anchor is never checked against the board; preview shapes are
/// not part of collision detection.
///
/// # Example
///
/// ```
/// use swiftris_engine::GameConfig;
///
/// let config: GameConfig = serde_json::from_str(r#"{ "rows": 24 }"#).unwrap();
/// assert_eq!(config.rows, 24);
/// assert_eq!(config.columns, 10);
/// config.validate().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GameConfig {
    pub columns: u16,
    pub rows: u16,
    pub starting_column: i32,
    pub starting_row: i32,
    pub preview_column: i32,
    pub preview_row: i32,
    pub points_per_line: u32,
    pub level_threshold: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            columns: 10,
            rows: 20,
            starting_column: 4,
            starting_row: 0,
            preview_column: 12,
            preview_row: 1,
            points_per_line: 10,
            level_threshold: 500,
        }
    }
}

impl GameConfig {
    /// Checks that a game can be played with this configuration.
    ///
    /// Every shape kind must fit on the board at the spawn anchor in every
    /// orientation; otherwise some spawns would end the game on an empty
    /// board. The preview anchor may lie off the board, but every preview
    /// block position must still be representable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(ConfigError::EmptyBoard {
                columns: self.columns,
                rows: self.rows,
            });
        }
        for kind in ShapeKind::ALL {
            for orientation in Orientation::ALL {
                if !self.fits_at_spawn(kind.offsets(orientation)) {
                    return Err(ConfigError::SpawnOutOfBounds { kind, orientation });
                }
            }
        }
        let (column, row) = (self.preview_column, self.preview_row);
        let preview_fits = ShapeKind::ALL.iter().all(|kind| {
            Orientation::ALL.iter().all(|&orientation| {
                kind.offsets(orientation)
                    .iter()
                    .all(|&offset| offset_cell(column, row, offset).is_some())
            })
        });
        if !preview_fits {
            return Err(ConfigError::PreviewAnchorOverflow { column, row });
        }
        if self.points_per_line == 0 {
            return Err(ConfigError::ZeroPointsPerLine);
        }
        if self.level_threshold == 0 {
            return Err(ConfigError::ZeroLevelThreshold);
        }
        Ok(())
    }

    fn fits_at_spawn(&self, offsets: ShapeOffsets) -> bool {
        let columns = i32::from(self.columns);
        let rows = i32::from(self.rows);
        offsets.iter().all(|&offset| {
            offset_cell(self.starting_column, self.starting_row, offset)
                .is_some_and(|(column, row)| {
                    (0..columns).contains(&column) && (0..rows).contains(&row)
                })
        })
    }
}

fn offset_cell(column: i32, row: i32, (dc, dr): (i32, i32)) -> Option<(i32, i32)> {
    Some((column.checked_add(dc)?, row.checked_add(dr)?))
}
