// ---------------------------------------------------------------------------
// TerrainError: failures of world terrain queries and asset loading
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors reported by the fallible `WorldTerrainContext` accessors and the
/// tree-coverage asset loader.
///
/// The infallible accessors map these to neutral values, so callers only see
/// this type when they ask for it.
#[derive(Debug, Clone, PartialEq)]
pub enum TerrainError {
    /// The context has not been built yet (or was unloaded).
    Uninitialized,
    /// A map-pixel coordinate outside the world grid.
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },
    /// A precomputed asset was absent or had the wrong number of cells.
    MissingAsset {
        name: &'static str,
        expected: usize,
        found: Option<usize>,
    },
}

impl fmt::Display for TerrainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerrainError::Uninitialized => write!(f, "World terrain context is not initialized"),
            TerrainError::OutOfBounds {
                x,
                y,
                width,
                height,
            } => write!(
                f,
                "Map pixel ({x}, {y}) is outside the {width}x{height} world grid"
            ),
            TerrainError::MissingAsset {
                name,
                expected,
                found: Some(found),
            } => write!(
                f,
                "Asset '{name}' has {found} cells, expected {expected}"
            ),
            TerrainError::MissingAsset {
                name,
                expected,
                found: None,
            } => write!(f, "Asset '{name}' is missing ({expected} cells expected)"),
        }
    }
}

impl std::error::Error for TerrainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terrain_error_display_uninitialized() {
        let msg = format!("{}", TerrainError::Uninitialized);
        assert!(msg.contains("not initialized"), "got: {msg}");
    }

    #[test]
    fn test_terrain_error_display_out_of_bounds() {
        let err = TerrainError::OutOfBounds {
            x: -1,
            y: 600,
            width: 1000,
            height: 500,
        };
        let msg = format!("{err}");
        assert!(msg.contains("(-1, 600)"), "got: {msg}");
        assert!(msg.contains("1000x500"), "got: {msg}");
    }

    #[test]
    fn test_terrain_error_display_missing_asset() {
        let missing = TerrainError::MissingAsset {
            name: "tree_coverage",
            expected: 64,
            found: None,
        };
        let msg = format!("{missing}");
        assert!(msg.contains("missing"), "got: {msg}");
        assert!(msg.contains("64"), "got: {msg}");

        let wrong = TerrainError::MissingAsset {
            name: "tree_coverage",
            expected: 64,
            found: Some(10),
        };
        let msg = format!("{wrong}");
        assert!(msg.contains("10 cells"), "got: {msg}");
    }

    #[test]
    fn test_terrain_error_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(TerrainError::Uninitialized);
        assert!(err.source().is_none());
    }
}
