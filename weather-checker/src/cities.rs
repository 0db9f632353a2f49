//! Bundled city list for the dropdown

/// Cities offered when the config file does not provide its own list.
/// Names are sent to the weather API as-is.
pub const BUNDLED_CITIES: &[&str] = &[
    "Nishinomiya",
    "Tokyo",
    "Osaka",
    "Kyoto",
    "Kobe",
    "Yokohama",
    "Nagoya",
    "Sapporo",
    "Sendai",
    "Niigata",
    "Kanazawa",
    "Hiroshima",
    "Matsuyama",
    "Fukuoka",
    "Kagoshima",
    "Naha",
];

pub fn bundled() -> Vec<String> {
    BUNDLED_CITIES.iter().map(|city| city.to_string()).collect()
}

/// Normalize a configured list: trim names, drop blanks and duplicates.
/// Falls back to the bundled list when nothing usable remains.
pub fn from_config(configured: &[String]) -> Vec<String> {
    let mut cities: Vec<String> = Vec::with_capacity(configured.len());
    for name in configured {
        let name = name.trim();
        if name.is_empty() || cities.iter().any(|c| c.eq_ignore_ascii_case(name)) {
            continue;
        }
        cities.push(name.to_string());
    }

    if cities.is_empty() {
        bundled()
    } else {
        cities
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_trims_and_dedups() {
        let configured = vec![
            "  London ".to_string(),
            "".to_string(),
            "london".to_string(),
            "Paris".to_string(),
        ];
        assert_eq!(from_config(&configured), vec!["London", "Paris"]);
    }

    #[test]
    fn test_from_config_blank_falls_back() {
        let configured = vec!["   ".to_string()];
        assert_eq!(from_config(&configured), bundled());
        assert_eq!(from_config(&[]), bundled());
    }
}
