//! The fixed list of NCAA football conferences.

/// Every conference the dashboard knows about, in sidebar order.
pub const KNOWN_CONFERENCES: [&str; 24] = [
    "Big Ten",
    "SEC",
    "Big 12",
    "Pac-12",
    "ACC",
    "Independent",
    "Mountain West",
    "American",
    "C-USA",
    "Sun Belt",
    "MAC",
    "Ohio Valley",
    "Ivy",
    "SWAC",
    "MEAC",
    "Big Sky",
    "CAA",
    "Patriot",
    "Southern",
    "Missouri Valley",
    "Big South",
    "Southland",
    "Pioneer",
    "Northeast",
];

/// Exact-match lookup in `KNOWN_CONFERENCES`.
pub fn is_known_conference(name: &str) -> bool {
    KNOWN_CONFERENCES.contains(&name)
}

/// Short label for narrow chart axes.
pub fn conference_short_label(name: &str) -> &str {
    match name {
        "Big Ten" => "B10",
        "Big 12" => "B12",
        "Pac-12" => "P12",
        "Independent" => "IND",
        "Mountain West" => "MW",
        "American" => "AAC",
        "C-USA" => "CUSA",
        "Sun Belt" => "SBC",
        "Ohio Valley" => "OVC",
        "Big Sky" => "BSky",
        "Patriot" => "PAT",
        "Southern" => "SoCon",
        "Missouri Valley" => "MVFC",
        "Big South" => "BSth",
        "Southland" => "SLC",
        "Pioneer" => "PFL",
        "Northeast" => "NEC",
        other => other,
    }
}
