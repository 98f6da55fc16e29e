// src/config/consts.rs

// Storage
pub const DEFAULT_DATA_ROOT: &str = "/data";
pub const DATA_ROOT_ENV: &str = "SCRAPE_DATA_ROOT";

// Net config
pub const TIMEOUT_ENV: &str = "SCRAPE_TIMEOUT";

pub const CHROME_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";
pub const ACCEPT_HTML: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";
pub const ACCEPT_LANGUAGE_ES: &str = "es-ES,es;q=0.9,en;q=0.8";
pub const GOOGLE_REFERER: &str = "https://www.google.com/";

// Header presets. Names are lowercase so they can go straight into `HeaderName::from_static`.
pub const HEADERS_PLAIN: &[(&str, &str)] = &[("user-agent", "Mozilla/5.0")];

pub const HEADERS_INDEX: &[(&str, &str)] = &[
    ("user-agent", CHROME_UA),
    ("accept", ACCEPT_HTML),
    ("accept-language", ACCEPT_LANGUAGE_ES),
    ("referer", GOOGLE_REFERER),
];

pub const HEADERS_LISTING: &[(&str, &str)] = &[
    ("user-agent", CHROME_UA),
    ("accept-language", ACCEPT_LANGUAGE_ES),
    ("referer", GOOGLE_REFERER),
];

/// Company websites get no Referer.
pub const HEADERS_PROBE: &[(&str, &str)] = &[
    ("user-agent", CHROME_UA),
    ("accept-language", ACCEPT_LANGUAGE_ES),
];

// Politeness
pub const LISTING_PAUSE_MS: u64 = 600;
pub const PROBE_PAUSE_MS: u64 = 350;

/// Paths tried, in order, when looking for contact data on a company website.
pub const CONTACT_PATHS: &[&str] = &[
    "",
    "contacto/",
    "contacto",
    "contact/",
    "aviso-legal/",
    "aviso-legal",
    "legal/",
    "privacy/",
    "politica-de-privacidad/",
    "politica-privacidad/",
    "privacidad/",
];

// Without --max-items the old probe stage only looks at this many companies
pub const PROBE_DEFAULT_ITEMS: usize = 10;
