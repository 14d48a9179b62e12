//! Ocean regions used for field domains and particle release
//!
//! Each named region has a lat/lon box. All but the Southern Ocean also
//! carry the reference release grid used for the regional biofouling runs.

use serde::Deserialize;

/// Lat/lon box in degrees. A box with `min_lon > max_lon` crosses the
/// dateline.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl Bounds {
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        if lat < self.min_lat || lat > self.max_lat {
            return false;
        }
        if self.min_lon <= self.max_lon {
            lon >= self.min_lon && lon <= self.max_lon
        } else {
            lon >= self.min_lon || lon <= self.max_lon
        }
    }
}

/// Evenly spaced axis, endpoints included, walked from `start` to `end`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axis {
    pub start: f64,
    pub end: f64,
    pub n: usize,
}

impl Axis {
    pub fn new(start: f64, end: f64, n: usize) -> Self {
        Self { start, end, n }
    }

    pub fn points(&self) -> Vec<f64> {
        match self.n {
            0 => Vec::new(),
            1 => vec![self.start],
            n => {
                let step = (self.end - self.start) / (n - 1) as f64;
                (0..n).map(|i| self.start + step * i as f64).collect()
            }
        }
    }
}

/// Release grid: every latitude paired with every longitude
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReleaseGrid {
    pub lat: Axis,
    pub lon: Axis,
}

impl ReleaseGrid {
    /// (lon, lat) pairs, latitude-major
    pub fn positions(&self) -> Vec<(f64, f64)> {
        let lons = self.lon.points();
        self.lat
            .points()
            .into_iter()
            .flat_map(|lat| lons.iter().map(move |&lon| (lon, lat)))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Region {
    #[serde(rename = "NPSG")] // North Pacific subtropical gyre
    Npsg,
    #[serde(rename = "EqPac")] // equatorial Pacific
    EqPac,
    #[serde(rename = "Med")] // Mediterranean
    Med,
    #[serde(rename = "SO")] // Southern Ocean
    So,
    #[serde(rename = "SubAtl")] // subtropical North Atlantic
    SubAtl,
}

impl Region {
    pub fn name(&self) -> &'static str {
        match self {
            Region::Npsg => "NPSG",
            Region::EqPac => "EqPac",
            Region::Med => "Med",
            Region::So => "SO",
            Region::SubAtl => "SubAtl",
        }
    }

    pub fn bounds(&self) -> Bounds {
        let (min_lat, max_lat, min_lon, max_lon) = match self {
            Region::Npsg => (20.0, 45.0, 110.0, -120.0),
            Region::EqPac => (-20.0, 20.0, 160.0, -120.0),
            Region::Med => (30.0, 45.0, -6.0, 36.0),
            Region::So => (-75.0, -45.0, -15.0, 25.0),
            Region::SubAtl => (8.0, 50.0, -75.0, -7.0),
        };
        Bounds { min_lat, max_lat, min_lon, max_lon }
    }

    pub fn release_grid(&self) -> Option<ReleaseGrid> {
        let grid = |lat: (f64, f64, usize), lon: (f64, f64, usize)| ReleaseGrid {
            lat: Axis::new(lat.0, lat.1, lat.2),
            lon: Axis::new(lon.0, lon.1, lon.2),
        };
        match self {
            Region::Npsg => Some(grid((28.0, 36.0, 5), (-135.0, -143.0, 5))),
            Region::EqPac => Some(grid((-4.0, 4.0, 5), (-140.0, -148.0, 5))),
            Region::Med => Some(grid((30.0, 40.0, 5), (21.0, 11.0, 5))),
            Region::SubAtl => Some(grid((10.0, 50.0, 10), (-60.0, -20.0, 10))),
            Region::So => None,
        }
    }
}
