use log::*;

use crate::*;

/// Largest map side for which every cell id still fits in an `i32`.
pub const MAX_MAP_CELLS: i32 = 46340;

/// Areas are padded by this many cells beyond what is needed to cover one screen height.
const AREA_PADDING_CELLS: i32 = 2;

/// The immutable description of the tile grid, as reported by the tile-rendering engine.
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    tile_size: V2<f64>,
    map_cells: i32,
    map_pixel_size: V2<f64>,
    anchor_offset: V2<f64>,
    /// Pixel position of the center of cell `(0, 0)`, in world space.
    origin: V2<f64>,
}

impl GridConfig {
    pub fn get_tile_size(&self) -> V2<f64> {
        self.tile_size
    }

    /// Width and height of the map in cells; maps are always square.
    pub fn get_map_cells(&self) -> i32 {
        self.map_cells
    }

    pub fn get_map_pixel_size(&self) -> V2<f64> {
        self.map_pixel_size
    }

    pub fn get_anchor_offset(&self) -> V2<f64> {
        self.anchor_offset
    }

    pub fn get_origin(&self) -> V2<f64> {
        self.origin
    }
}

/// How the map is carved into square areas.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct AreaConfig {
    side: i32,
    areas_per_side: i32,
}

impl AreaConfig {
    /// Work out the area partition for a map of `map_cells` cells viewed through a viewport `viewport_height`
    /// pixels tall.
    ///
    /// The side is the number of tile rows covering one screen height, plus padding, rounded up to even, and
    /// never more than the map itself.
    pub fn derive(map_cells: i32, tile_height: f64, viewport_height: f64) -> AreaConfig {
        // Stay in f64 until capped; tiny tiles or huge viewports don't fit in an i32.
        let min_cells = (viewport_height / tile_height).ceil();
        let padded = min_cells + AREA_PADDING_CELLS as f64;
        let even = (padded / 2.0).ceil() * 2.0;
        let side = even.min(map_cells as f64).max(1.0) as i32;
        let areas_per_side = (map_cells + side - 1) / side;
        AreaConfig {
            side,
            areas_per_side,
        }
    }

    /// Side length of one area, in cells.
    pub fn get_side(&self) -> i32 {
        self.side
    }

    /// Width and height of the area grid; the area grid is square because the map is.
    pub fn get_areas_per_side(&self) -> i32 {
        self.areas_per_side
    }

    pub fn get_area_count(&self) -> i32 {
        self.areas_per_side * self.areas_per_side
    }
}

/// The grid: tile geometry, area partition and viewport size, fixed for the lifetime of a map.
///
/// Build with [GridBuilder].  Share by reference (or `Arc`) between the viewport and the streaming cache.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub(crate) config: GridConfig,
    pub(crate) areas: AreaConfig,
    pub(crate) viewport_size: V2<f64>,
}

impl Grid {
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn areas(&self) -> &AreaConfig {
        &self.areas
    }

    pub fn get_viewport_size(&self) -> V2<f64> {
        self.viewport_size
    }

    /// Shorthand for the map side in cells.
    pub fn get_map_cells(&self) -> i32 {
        self.config.map_cells
    }

    /// Shorthand for the area side in cells.
    pub fn get_area_side(&self) -> i32 {
        self.areas.side
    }
}

#[derive(Debug, Default)]
pub struct GridBuilder {
    tile_size: Option<V2<f64>>,
    map_cells: Option<V2<i32>>,
    map_pixel_size: Option<V2<f64>>,
    anchor_offset: Option<V2<f64>>,
    viewport_size: Option<V2<f64>>,
}

impl GridBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn tile_size(mut self, width: f64, height: f64) -> Self {
        self.tile_size = Some(V2::new(width, height));
        self
    }

    pub fn map_cells(mut self, width: i32, height: i32) -> Self {
        self.map_cells = Some(V2::new(width, height));
        self
    }

    /// Pixel size of the whole map.  If not set, this is that of the full diamond: `cells * tile_size`.
    pub fn map_pixel_size(mut self, width: f64, height: f64) -> Self {
        self.map_pixel_size = Some(V2::new(width, height));
        self
    }

    /// Offset between the map's local origin and its rendering anchor.  Defaults to zero.
    pub fn anchor_offset(mut self, x: f64, y: f64) -> Self {
        self.anchor_offset = Some(V2::new(x, y));
        self
    }

    pub fn viewport_size(mut self, width: f64, height: f64) -> Self {
        self.viewport_size = Some(V2::new(width, height));
        self
    }

    pub fn build(self) -> Result<Grid> {
        fn positive(v: V2<f64>) -> bool {
            v.x.is_finite() && v.y.is_finite() && v.x > 0.0 && v.y > 0.0
        }

        let tile_size = self.tile_size.ok_or(ConfigError::Missing("tile_size"))?;
        let map_cells = self.map_cells.ok_or(ConfigError::Missing("map_cells"))?;
        let viewport_size = self
            .viewport_size
            .ok_or(ConfigError::Missing("viewport_size"))?;

        if !positive(tile_size) {
            return Err(ConfigError::InvalidTileSize {
                width: tile_size.x,
                height: tile_size.y,
            });
        }

        if map_cells.x != map_cells.y {
            return Err(ConfigError::NonSquareMap {
                width: map_cells.x,
                height: map_cells.y,
            });
        }
        let cells = map_cells.x;
        if cells <= 0 || cells > MAX_MAP_CELLS {
            return Err(ConfigError::InvalidMapSize {
                width: cells as f64,
                height: cells as f64,
            });
        }

        let map_pixel_size = self
            .map_pixel_size
            .unwrap_or_else(|| V2::new(cells as f64 * tile_size.x, cells as f64 * tile_size.y));
        if !positive(map_pixel_size) {
            return Err(ConfigError::InvalidMapSize {
                width: map_pixel_size.x,
                height: map_pixel_size.y,
            });
        }

        if !positive(viewport_size) {
            return Err(ConfigError::InvalidViewport {
                width: viewport_size.x,
                height: viewport_size.y,
            });
        }

        let anchor_offset = self.anchor_offset.unwrap_or_default();
        if !anchor_offset.x.is_finite() || !anchor_offset.y.is_finite() {
            return Err(ConfigError::InvalidAnchor {
                x: anchor_offset.x,
                y: anchor_offset.y,
            });
        }

        let origin = V2::new(
            cells as f64 * tile_size.x / 2.0,
            cells as f64 * tile_size.y - tile_size.y / 2.0,
        );
        let areas = AreaConfig::derive(cells, tile_size.y, viewport_size.y);

        info!(
            "Grid configured: {} cells per side, tile {}, area side {} ({} areas per side), viewport {}",
            cells,
            tile_size,
            areas.side,
            areas.areas_per_side,
            viewport_size
        );

        Ok(Grid {
            config: GridConfig {
                tile_size,
                map_cells: cells,
                map_pixel_size,
                anchor_offset,
                origin,
            },
            areas,
            viewport_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn test_area_side_from_viewport() {
        // 720 / 128 rounds up to 6 rows, padded to 8.
        let a = AreaConfig::derive(20, 128.0, 720.0);
        assert_eq!(a.get_side(), 8);
        assert_eq!(a.get_areas_per_side(), 3);
        assert_eq!(a.get_area_count(), 9);

        // 5 rows padded to 7, rounded up to even.
        let a = AreaConfig::derive(100, 128.0, 600.0);
        assert_eq!(a.get_side(), 8);

        // Never bigger than the map.
        let a = AreaConfig::derive(5, 128.0, 1080.0);
        assert_eq!(a.get_side(), 5);
        assert_eq!(a.get_areas_per_side(), 1);
    }

    #[test]
    fn test_origin() -> Result<()> {
        let grid = GridBuilder::new()
            .tile_size(256.0, 128.0)
            .map_cells(20, 20)
            .viewport_size(1280.0, 720.0)
            .build()?;
        assert_relative_eq!(grid.config().get_origin().x, 2560.0);
        assert_relative_eq!(grid.config().get_origin().y, 2496.0);
        assert_relative_eq!(grid.config().get_map_pixel_size().x, 5120.0);
        assert_eq!(grid.get_area_side(), 8);
        Ok(())
    }

    #[test]
    fn test_builder_validation() {
        assert!(matches!(
            GridBuilder::new()
                .map_cells(20, 20)
                .viewport_size(1.0, 1.0)
                .build(),
            Err(ConfigError::Missing("tile_size"))
        ));
        assert!(matches!(
            GridBuilder::new()
                .tile_size(256.0, 128.0)
                .map_cells(20, 21)
                .viewport_size(1.0, 1.0)
                .build(),
            Err(ConfigError::NonSquareMap { .. })
        ));
        assert!(matches!(
            GridBuilder::new()
                .tile_size(0.0, 128.0)
                .map_cells(20, 20)
                .viewport_size(1.0, 1.0)
                .build(),
            Err(ConfigError::InvalidTileSize { .. })
        ));
        assert!(matches!(
            GridBuilder::new()
                .tile_size(256.0, 128.0)
                .map_cells(MAX_MAP_CELLS + 1, MAX_MAP_CELLS + 1)
                .viewport_size(1.0, 1.0)
                .build(),
            Err(ConfigError::InvalidMapSize { .. })
        ));
        assert!(matches!(
            GridBuilder::new()
                .tile_size(256.0, 128.0)
                .map_cells(20, 20)
                .viewport_size(-1.0, 720.0)
                .build(),
            Err(ConfigError::InvalidViewport { .. })
        ));
    }

    #[test]
    fn test_area_side_caps_huge_screen_ratios() {
        let g = GridBuilder::new()
            .tile_size(256.0, 128.0)
            .map_cells(20, 20)
            .viewport_size(1280.0, 1e12)
            .build()
            .unwrap();
        assert_eq!(g.get_area_side(), 20);
        assert_eq!(g.areas().get_areas_per_side(), 1);

        let g = GridBuilder::new()
            .tile_size(256.0, 1e-300)
            .map_cells(20, 20)
            .viewport_size(1280.0, 720.0)
            .build()
            .unwrap();
        assert_eq!(g.get_area_side(), 20);
        assert_eq!(g.areas().get_area_count(), 1);

        let a = AreaConfig::derive(MAX_MAP_CELLS, f64::MIN_POSITIVE, f64::MAX);
        assert_eq!(a.get_side(), MAX_MAP_CELLS);
    }
}
