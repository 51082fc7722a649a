use std::collections::HashMap;
use std::sync::LazyLock;

use crate::models::location::Coordinates;
use crate::models::tracking_period::DEFAULT_LOCATION;

pub const DEFAULT_COORDINATES: Coordinates = Coordinates::new(21.4225, 39.8262);

const LOCATIONS: &[(&str, Coordinates)] = &[
    ("Mecca,Saudi Arabia", DEFAULT_COORDINATES),
    ("Medina,Saudi Arabia", Coordinates::new(24.4672, 39.6111)),
    ("Riyadh,Saudi Arabia", Coordinates::new(24.7136, 46.6753)),
    ("Jeddah,Saudi Arabia", Coordinates::new(21.4858, 39.1925)),
    ("Dubai,UAE", Coordinates::new(25.2048, 55.2708)),
    ("Abu Dhabi,UAE", Coordinates::new(24.4539, 54.3773)),
    ("Doha,Qatar", Coordinates::new(25.2854, 51.5310)),
    ("Kuwait City,Kuwait", Coordinates::new(29.3759, 47.9774)),
    ("Manama,Bahrain", Coordinates::new(26.2285, 50.5860)),
    ("Muscat,Oman", Coordinates::new(23.5880, 58.3829)),
    ("Amman,Jordan", Coordinates::new(31.9454, 35.9284)),
    ("Jerusalem,Palestine", Coordinates::new(31.7683, 35.2137)),
    ("Beirut,Lebanon", Coordinates::new(33.8938, 35.5018)),
    ("Damascus,Syria", Coordinates::new(33.5138, 36.2765)),
    ("Baghdad,Iraq", Coordinates::new(33.3152, 44.3661)),
    ("Tehran,Iran", Coordinates::new(35.6892, 51.3890)),
    ("Istanbul,Turkey", Coordinates::new(41.0082, 28.9784)),
    ("Ankara,Turkey", Coordinates::new(39.9334, 32.8597)),
    ("Cairo,Egypt", Coordinates::new(30.0444, 31.2357)),
    ("Alexandria,Egypt", Coordinates::new(31.2001, 29.9187)),
    ("Casablanca,Morocco", Coordinates::new(33.5731, -7.5898)),
    ("Rabat,Morocco", Coordinates::new(34.0209, -6.8416)),
    ("Algiers,Algeria", Coordinates::new(36.7538, 3.0588)),
    ("Tunis,Tunisia", Coordinates::new(36.8065, 10.1815)),
    ("Khartoum,Sudan", Coordinates::new(15.5007, 32.5599)),
    ("Lagos,Nigeria", Coordinates::new(6.5244, 3.3792)),
    ("Kano,Nigeria", Coordinates::new(12.0022, 8.5920)),
    ("Dakar,Senegal", Coordinates::new(14.7167, -17.4677)),
    ("Mogadishu,Somalia", Coordinates::new(2.0469, 45.3182)),
    ("Nairobi,Kenya", Coordinates::new(-1.2921, 36.8219)),
    ("Karachi,Pakistan", Coordinates::new(24.8607, 67.0011)),
    ("Lahore,Pakistan", Coordinates::new(31.5204, 74.3587)),
    ("Islamabad,Pakistan", Coordinates::new(33.6844, 73.0479)),
    ("Kabul,Afghanistan", Coordinates::new(34.5553, 69.2075)),
    ("Delhi,India", Coordinates::new(28.6139, 77.2090)),
    ("Mumbai,India", Coordinates::new(19.0760, 72.8777)),
    ("Hyderabad,India", Coordinates::new(17.3850, 78.4867)),
    ("Dhaka,Bangladesh", Coordinates::new(23.8103, 90.4125)),
    ("Kuala Lumpur,Malaysia", Coordinates::new(3.1390, 101.6869)),
    ("Singapore,Singapore", Coordinates::new(1.3521, 103.8198)),
    ("Jakarta,Indonesia", Coordinates::new(-6.2088, 106.8456)),
    ("London,UK", Coordinates::new(51.5074, -0.1278)),
    ("Birmingham,UK", Coordinates::new(52.4862, -1.8904)),
    ("Manchester,UK", Coordinates::new(53.4808, -2.2426)),
    ("Paris,France", Coordinates::new(48.8566, 2.3522)),
    ("Berlin,Germany", Coordinates::new(52.5200, 13.4050)),
    ("Amsterdam,Netherlands", Coordinates::new(52.3676, 4.9041)),
    ("Brussels,Belgium", Coordinates::new(50.8503, 4.3517)),
    ("Stockholm,Sweden", Coordinates::new(59.3293, 18.0686)),
    ("New York,USA", Coordinates::new(40.7128, -74.0060)),
    ("Chicago,USA", Coordinates::new(41.8781, -87.6298)),
    ("Houston,USA", Coordinates::new(29.7604, -95.3698)),
    ("Dearborn,USA", Coordinates::new(42.3223, -83.1763)),
    ("Los Angeles,USA", Coordinates::new(34.0522, -118.2437)),
    ("Toronto,Canada", Coordinates::new(43.6532, -79.3832)),
    ("Montreal,Canada", Coordinates::new(45.5017, -73.5673)),
    ("Sydney,Australia", Coordinates::new(-33.8688, 151.2093)),
    ("Melbourne,Australia", Coordinates::new(-37.8136, 144.9631)),
];

static LOOKUP: LazyLock<HashMap<String, Coordinates>> = LazyLock::new(|| {
    LOCATIONS
        .iter()
        .map(|(name, coords)| (name.to_lowercase(), *coords))
        .collect()
});

/// Coordinates for a `"City,Region"` name; the default location on a miss.
pub fn resolve(name: &str) -> Coordinates {
    match lookup(name) {
        Some(coords) => coords,
        None => {
            tracing::debug!(location = name, fallback = DEFAULT_LOCATION, "unknown location");
            DEFAULT_COORDINATES
        }
    }
}

pub fn lookup(name: &str) -> Option<Coordinates> {
    LOOKUP.get(&name.trim().to_lowercase()).copied()
}

pub fn is_known(name: &str) -> bool {
    lookup(name).is_some()
}

/// Display names in table order.
pub fn known_locations() -> impl Iterator<Item = &'static str> {
    LOCATIONS.iter().map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_location_is_in_the_table() {
        assert_eq!(lookup(DEFAULT_LOCATION), Some(DEFAULT_COORDINATES));
    }

    #[test]
    fn table_keys_are_unique_after_lowercasing() {
        assert_eq!(LOOKUP.len(), LOCATIONS.len());
    }

    #[test]
    fn lookup_is_case_and_whitespace_insensitive() {
        let expected = Coordinates::new(30.0444, 31.2357);
        assert_eq!(lookup("Cairo,Egypt"), Some(expected));
        assert_eq!(lookup("\tcairo,egypt\n"), Some(expected));
        assert_eq!(lookup("CAIRO,EGYPT"), Some(expected));
    }

    #[test]
    fn interior_spacing_must_match() {
        assert!(lookup("Cairo, Egypt").is_none());
        assert_eq!(resolve("Cairo, Egypt"), DEFAULT_COORDINATES);
    }

    #[test]
    fn empty_name_falls_back() {
        assert_eq!(resolve(""), DEFAULT_COORDINATES);
        assert_eq!(resolve("   "), DEFAULT_COORDINATES);
        assert!(!is_known(""));
    }
}
