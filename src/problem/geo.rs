use crate::problem::Num;

pub const EARTH_RADIUS: Num = 6.371e6;

/// Geographic coordinate in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatLon {
    pub lat: Num,
    pub lon: Num,
}

impl LatLon {
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

/// Planar coordinate in meters.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: Num,
    pub y: Num,
}

impl Point {
    pub fn new(x: Num, y: Num) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[inline(always)]
    pub fn taxicab(&self, other: &Point) -> Num {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    #[inline(always)]
    pub fn squared_euclidean(&self, other: &Point) -> Num {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    #[inline(always)]
    pub fn euclidean(&self, other: &Point) -> Num {
        self.squared_euclidean(other).sqrt()
    }
}

/// Equirectangular projection around `reference_latitude` (degrees).
///
/// Only valid for the local extent of a single instance; every coordinate of an instance has to
/// be projected with the same reference (the depot latitude).
pub fn project(coord: LatLon, reference_latitude: Num) -> Point {
    Point {
        x: EARTH_RADIUS * reference_latitude.to_radians().cos() * coord.lon.to_radians(),
        y: EARTH_RADIUS * coord.lat.to_radians(),
    }
}
