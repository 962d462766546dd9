/// First word of a generated campground title
pub const DESCRIPTORS: &[&str] = &[
    "Forest",
    "Ancient",
    "Petrified",
    "Roaring",
    "Cascade",
    "Tumbling",
    "Silent",
    "Redwood",
    "Bullfrog",
    "Maple",
    "Misty",
    "Elk",
    "Grizzly",
    "Ocean",
    "Sea",
    "Sky",
    "Dusty",
    "Diamond",
];

/// Second word of a generated campground title
pub const PLACES: &[&str] = &[
    "Flats",
    "Village",
    "Canyon",
    "Pond",
    "Group Camp",
    "Horse Camp",
    "Ghost Town",
    "Camp",
    "Dispersed Camp",
    "Backcountry",
    "River",
    "Creek",
    "Creekside",
    "Bay",
    "Spring",
    "Bayshore",
    "Sands",
    "Mule Camp",
    "Hunting Camp",
    "Cliffs",
    "Hollow",
];
