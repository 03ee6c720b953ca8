use crate::geo::LatLon;

/// Raster basemap tiles are square.
pub const TILE_SIZE_PX: u32 = 256;

/// Latitude limit of the square Web Mercator projection.
pub const MERCATOR_LAT_LIMIT_DEG: f64 = 85.051_128_78;

/// Tile coordinate in the ZXY scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    pub z: u8,
    pub x: u32,
    pub y: u32,
}

impl TileCoord {
    pub fn new(z: u8, x: u32, y: u32) -> Self {
        Self { z, x, y }
    }

    /// Tiles along one axis at zoom `z` (2^z).
    pub fn per_axis(z: u8) -> u32 {
        1u32 << z
    }

    /// Geographic bounds of this tile in WGS84 (lon_min, lat_min, lon_max, lat_max).
    pub fn bounds_wgs84(&self) -> (f64, f64, f64, f64) {
        let n = f64::from(Self::per_axis(self.z));
        let lon_min = (f64::from(self.x) / n) * 360.0 - 180.0;
        let lon_max = (f64::from(self.x + 1) / n) * 360.0 - 180.0;

        // Y grows southward in ZXY.
        let lat_max = tile_y_to_lat(self.y, self.z);
        let lat_min = tile_y_to_lat(self.y + 1, self.z);

        (lon_min, lat_min, lon_max, lat_max)
    }
}

fn tile_y_to_lat(y: u32, z: u8) -> f64 {
    let n = std::f64::consts::PI
        - 2.0 * std::f64::consts::PI * f64::from(y) / f64::from(TileCoord::per_axis(z));
    (0.5 * (n.exp() - (-n).exp())).atan().to_degrees()
}

/// A position in global pixel space at some zoom level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldPx {
    pub x: f64,
    pub y: f64,
}

/// Project a geographic point into global pixel space at zoom `z`.
pub fn project(p: LatLon, z: u8) -> WorldPx {
    let world_px = f64::from(TileCoord::per_axis(z)) * f64::from(TILE_SIZE_PX);
    let lat = p
        .lat_deg
        .clamp(-MERCATOR_LAT_LIMIT_DEG, MERCATOR_LAT_LIMIT_DEG)
        .to_radians();

    let x = (p.lon_deg + 180.0) / 360.0 * world_px;
    let y = (1.0 - ((lat.tan() + 1.0 / lat.cos()).ln()) / std::f64::consts::PI) / 2.0 * world_px;
    WorldPx { x, y }
}

/// The tile under a geographic point at zoom `z`.
pub fn tile_containing(p: LatLon, z: u8) -> TileCoord {
    let px = project(p, z);
    let max = TileCoord::per_axis(z) - 1;
    let tile = f64::from(TILE_SIZE_PX);
    TileCoord {
        z,
        x: ((px.x / tile).floor() as i64).clamp(0, i64::from(max)) as u32,
        y: ((px.y / tile).floor() as i64).clamp(0, i64::from(max)) as u32,
    }
}

/// A pixel position relative to the top-left corner of the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPx {
    pub x: f64,
    pub y: f64,
}

/// A basemap tile together with where its top-left corner lands on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedTile {
    pub tile: TileCoord,
    pub screen: ScreenPx,
}

/// A map viewport: a center, a zoom level, and a pixel size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: LatLon,
    pub zoom: u8,
    pub width_px: u32,
    pub height_px: u32,
}

impl Viewport {
    pub fn new(center: LatLon, zoom: u8, width_px: u32, height_px: u32) -> Self {
        Self {
            center,
            zoom,
            width_px,
            height_px,
        }
    }

    fn top_left_world(&self) -> WorldPx {
        let c = project(self.center, self.zoom);
        WorldPx {
            x: c.x - f64::from(self.width_px) / 2.0,
            y: c.y - f64::from(self.height_px) / 2.0,
        }
    }

    /// Where a geographic point lands inside the viewport.
    pub fn screen_position(&self, p: LatLon) -> ScreenPx {
        let origin = self.top_left_world();
        let px = project(p, self.zoom);
        ScreenPx {
            x: px.x - origin.x,
            y: px.y - origin.y,
        }
    }

    /// Every tile that intersects the viewport, with its screen placement.
    ///
    /// X wraps around the antimeridian; Y is clipped to the world.
    pub fn visible_tiles(&self) -> Vec<PlacedTile> {
        let origin = self.top_left_world();
        let tile = f64::from(TILE_SIZE_PX);
        let per_axis = TileCoord::per_axis(self.zoom);

        let x_first = (origin.x / tile).floor() as i64;
        let x_last = ((origin.x + f64::from(self.width_px)) / tile).floor() as i64;
        let y_first = (origin.y / tile).floor() as i64;
        let y_last = ((origin.y + f64::from(self.height_px)) / tile).floor() as i64;

        let mut placed = Vec::new();
        for ty in y_first..=y_last {
            if ty < 0 || ty >= i64::from(per_axis) {
                continue;
            }
            for tx in x_first..=x_last {
                let wrapped = tx.rem_euclid(i64::from(per_axis)) as u32;
                placed.push(PlacedTile {
                    tile: TileCoord::new(self.zoom, wrapped, ty as u32),
                    screen: ScreenPx {
                        x: (tx as f64) * tile - origin.x,
                        y: (ty as f64) * tile - origin.y,
                    },
                });
            }
        }
        placed
    }
}
