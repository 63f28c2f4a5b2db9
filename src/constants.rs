// Threat circle: 20 miles * 1.8^(2m - 5), converted to km
pub const THREAT_BASE_MILES: f64 = 20.0;
pub const THREAT_GROWTH: f64 = 1.8;
pub const KM_PER_MILE: f64 = 1.6;

// Mean Earth radius (IUGG), the sphere geo's haversine measures on
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

// Marker sizes
pub const QUAKE_RADIUS_PER_MAGNITUDE: f64 = 1.75;
pub const CITY_MARKER_SIZE: f64 = 5.0;

// Depth buckets (km) - shallow below 70, intermediate below 300, deep otherwise
pub const THRESHOLD_INTERMEDIATE: f64 = 70.0;
pub const THRESHOLD_DEEP: f64 = 300.0;

// Magnitude classes
pub const THRESHOLD_LIGHT: f64 = 4.0;
pub const THRESHOLD_MODERATE: f64 = 5.0;

// Defaults
pub const DEFAULT_TOP_QUAKES: usize = 20;
pub const DEFAULT_HIT_RADIUS_KM: f64 = 50.0;
pub const DEFAULT_LOG_FILTER: &str = "info";
pub const CONFIG_FILE_NAME: &str = "quakemap.ini";
