/// A city and the state it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct City {
    /// City name
    pub city: &'static str,
    /// State name
    pub state: &'static str,
}

impl City {
    /// Formats the city as a campground location, e.g. "Tucson, Arizona"
    pub fn location(&self) -> String {
        format!("{}, {}", self.city, self.state)
    }
}

const fn city(city: &'static str, state: &'static str) -> City {
    City { city, state }
}

/// Locations used for generated campgrounds
pub const CITIES: &[City] = &[
    city("New York", "New York"),
    city("Los Angeles", "California"),
    city("Chicago", "Illinois"),
    city("Houston", "Texas"),
    city("Philadelphia", "Pennsylvania"),
    city("Phoenix", "Arizona"),
    city("San Antonio", "Texas"),
    city("San Diego", "California"),
    city("Dallas", "Texas"),
    city("San Jose", "California"),
    city("Austin", "Texas"),
    city("Indianapolis", "Indiana"),
    city("Jacksonville", "Florida"),
    city("San Francisco", "California"),
    city("Columbus", "Ohio"),
    city("Charlotte", "North Carolina"),
    city("Fort Worth", "Texas"),
    city("Detroit", "Michigan"),
    city("El Paso", "Texas"),
    city("Memphis", "Tennessee"),
    city("Seattle", "Washington"),
    city("Denver", "Colorado"),
    city("Washington", "District of Columbia"),
    city("Boston", "Massachusetts"),
    city("Nashville", "Tennessee"),
    city("Baltimore", "Maryland"),
    city("Oklahoma City", "Oklahoma"),
    city("Louisville", "Kentucky"),
    city("Portland", "Oregon"),
    city("Las Vegas", "Nevada"),
    city("Milwaukee", "Wisconsin"),
    city("Albuquerque", "New Mexico"),
    city("Tucson", "Arizona"),
    city("Fresno", "California"),
    city("Sacramento", "California"),
    city("Long Beach", "California"),
    city("Kansas City", "Missouri"),
    city("Mesa", "Arizona"),
    city("Virginia Beach", "Virginia"),
    city("Atlanta", "Georgia"),
    city("Colorado Springs", "Colorado"),
    city("Omaha", "Nebraska"),
    city("Raleigh", "North Carolina"),
    city("Miami", "Florida"),
    city("Oakland", "California"),
    city("Minneapolis", "Minnesota"),
    city("Tulsa", "Oklahoma"),
    city("Cleveland", "Ohio"),
    city("Wichita", "Kansas"),
    city("Arlington", "Texas"),
    city("New Orleans", "Louisiana"),
    city("Bakersfield", "California"),
    city("Tampa", "Florida"),
    city("Honolulu", "Hawaii"),
    city("Aurora", "Colorado"),
    city("Anaheim", "California"),
    city("Santa Ana", "California"),
    city("St. Louis", "Missouri"),
    city("Riverside", "California"),
    city("Corpus Christi", "Texas"),
    city("Pittsburgh", "Pennsylvania"),
    city("Lexington", "Kentucky"),
    city("Anchorage", "Alaska"),
    city("Stockton", "California"),
    city("Cincinnati", "Ohio"),
    city("Saint Paul", "Minnesota"),
    city("Toledo", "Ohio"),
    city("Newark", "New Jersey"),
    city("Greensboro", "North Carolina"),
    city("Plano", "Texas"),
    city("Henderson", "Nevada"),
    city("Lincoln", "Nebraska"),
    city("Buffalo", "New York"),
    city("Fort Wayne", "Indiana"),
    city("Jersey City", "New Jersey"),
    city("Chula Vista", "California"),
    city("Orlando", "Florida"),
    city("St. Petersburg", "Florida"),
    city("Norfolk", "Virginia"),
    city("Chandler", "Arizona"),
    city("Laredo", "Texas"),
    city("Madison", "Wisconsin"),
    city("Durham", "North Carolina"),
    city("Lubbock", "Texas"),
    city("Winston-Salem", "North Carolina"),
    city("Garland", "Texas"),
    city("Glendale", "Arizona"),
    city("Hialeah", "Florida"),
    city("Reno", "Nevada"),
    city("Baton Rouge", "Louisiana"),
    city("Irvine", "California"),
    city("Chesapeake", "Virginia"),
    city("Irving", "Texas"),
    city("Scottsdale", "Arizona"),
    city("North Las Vegas", "Nevada"),
    city("Fremont", "California"),
    city("Gilbert", "Arizona"),
    city("San Bernardino", "California"),
    city("Boise", "Idaho"),
    city("Birmingham", "Alabama"),
];

/// Returns the entry whose formatted location equals `location`
pub fn find_by_location(location: &str) -> Option<&'static City> {
    CITIES.iter().find(|c| c.location() == location)
}
