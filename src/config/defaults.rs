//! System-wide default constants and built-in reference tables.
//!
//! Every value here is what an empty `bird_alert.toml` resolves to.

// ============================================================================
// Alerting
// ============================================================================

/// Radius of the notification zone around the station (statute miles).
pub const DEFAULT_RANGE_MILES: f64 = 20.0;

/// Minimum seconds between two alerts for the same aircraft.
pub const DEFAULT_COOLDOWN_SECS: u64 = 600;

/// Transponder / source categories that alert by default.
///
/// `adsb_icao_nt` (ADS-B equipped non-transponder emitters such as ground
/// vehicles) is deliberately left out.
pub const DEFAULT_TRANSPONDER_TYPES: &[&str] = &[
    "adsb_icao",  // Mode S or ADS-B transponder
    "adsr_icao",  // Rebroadcast of ADS-B messages originally sent via UAT
    "tisb_icao",  // Non-ADS-B aircraft
    "adsc",       // ADS-Contract via satellite downlink
    "mlat",       // Multilateration
    "mode_s",     // Mode S, no position transmitted
    "adsb_other", // ADS-B using a non-ICAO (anonymised) address
    "adsr_other", // UAT rebroadcast using a non-ICAO address
    "tisb_other", // Non-ADS-B target using a non-ICAO address
];

// ============================================================================
// Feed
// ============================================================================

/// Location of the readsb aircraft feed.
pub const DEFAULT_AIRCRAFT_JSON_PATH: &str = "/run/readsb/aircraft.json";

/// Seconds between poll cycles.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

// ============================================================================
// Registry
// ============================================================================

/// Local copy of the Mictronics aircraft database.
pub const DEFAULT_REGISTRY_PATH: &str = "~/aircrafts.json";

/// Upstream Mictronics aircraft database.
pub const DEFAULT_REGISTRY_URL: &str =
    "https://raw.githubusercontent.com/Mictronics/readsb-protobuf/refs/heads/dev/webapp/src/db/aircrafts.json";

/// Re-download the registry when the local copy is older than this (seconds).
pub const DEFAULT_REGISTRY_REFRESH_SECS: u64 = 3_600;

// ============================================================================
// Notifications
// ============================================================================

/// Per-channel request timeout (seconds).
pub const DEFAULT_NOTIFY_TIMEOUT_SECS: u64 = 10;

/// Subject line / title used by channels that support one.
pub const ALERT_SUBJECT: &str = "Bird Alert!";

pub const DEFAULT_SMTP_PORT: u16 = 587;

pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

pub const PUSHOVER_MESSAGES_URL: &str = "https://api.pushover.net/1/messages.json";

pub const IFTTT_TRIGGER_BASE: &str = "https://maker.ifttt.com/trigger";

// ============================================================================
// Watchlists
// ============================================================================

/// Specific airframes that always alert inside the geofence.
pub const DEFAULT_HEX_WATCHLIST: &[(&str, &str)] = &[
    ("a35e6b", "Elton John's Bombardier Global Express (M-EDZE)"),
    ("a35e89", "Oprah Winfrey's Gulfstream G650 (N540W)"),
    ("a3a8a7", "Elon Musk's Gulfstream V (N272BG)"),
    ("a3a8c2", "George Lucas's Gulfstream V (N138GL)"),
    ("a3b23a", "Michael Bloomberg's Dassault Falcon 900 (N8AG)"),
    ("a3b29b", "Jim Carrey's Gulfstream V (N162JC)"),
    ("a3b78d", "Judge Judy's Cessna Citation 750 (N555QB)"),
    ("a3d53f", "Nike Corporation's Gulfstream G650 (N6453)"),
    ("a3e31a", "Michael Bloomberg's Dassault Falcon 900 (N5MV)"),
    ("a3e3d2", "Caesars Palace Casino's Gulfstream V (N898CE)"),
    ("a4b69f", "Matt Damon's Bombardier Global 7500 (N444WT)"),
    ("a4b7df", "Larry Ellison's Gulfstream G650 (N817GS)"),
    ("a4bd79", "Mark Wahlberg's Bombardier Global Express (N143MW)"),
    ("a44e47", "Michael Jordan's Gulfstream V (N236MJ)"),
    ("a44e85", "Mark Zuckerberg's Gulfstream G650 (N68885)"),
    ("a53afc", "Ronald Perelman's Gulfstream G650 (N838MF)"),
    ("a54e98", "Travis Scott's Embraer E-190 (N713TS)"),
    ("a59bfa", "Kid Rock's Bombardier Challenger 600 (N71KR)"),
    ("a59f1b", "Tom Cruise's Bombardier Challenger 350 (N350XX)"),
    ("a59525", "Dan Bilzerian's Gulfstream IV (N701DB)"),
    ("a5958b", "Bill Gates' Cessna 208 Amphibian Caravan"),
    ("a60e73", "Bill Gates's Gulfstream G650 (N887WM)"),
    ("a60e84", "Bill Gates's Gulfstream G650 (N194WM)"),
    ("a62742", "Eric Schmidt's Gulfstream G650 (N652WE)"),
    ("a6758d", "Tyler Perry's Embraer E-190 (N378TP)"),
    ("a68258", "Elon Musk's Gulfstream G650 (N628TS)"),
    ("a96f69", "John Travolta's Boeing 707-136B"),
    ("a98bfa", "Kid Rock's Bombardier Challenger 600 (N71KR)"),
    ("a1e4f2", "Phil Knight's Gulfstream G650 (N1KE)"),
    ("a1b8ab", "Luke Bryan's Learjet 60 (N506AB)"),
    ("a1f680", "Steve Ballmer's Gulfstream G650 (N709DS)"),
    ("a2c818", "Sergey Brin's Gulfstream G650 (N232G)"),
    ("a2cb4d", "Kylie Jenner's Bombardier Global 7500 (N810KJ)"),
    ("a2e4cd", "Kim Kardashian's Gulfstream G650 (N1980K)"),
    ("a2e77d", "David Geffen's Gulfstream G650 (N221DG)"),
    ("a47bf4", "Donald Trump's Boeing 757 (N757AF)"),
    ("a48d23", "Lady Gaga's Gulfstream V (N474D)"),
    ("a4bdb3", "Steve Wynn's Gulfstream V (N88WR)"),
    ("a5e41b", "Bill Gates's Gulfstream G650 (N887WM)"),
    ("a0b70e", "Google's Gulfstream V (N10XG)"),
    ("ac39d6", "Bill Gates' Gulfstream G650ER"),
    ("a17907", "Bill Gates' Gulfstream G650ER"),
    ("ac64c6", "Taylor Swift's Dassault Falcon 900"),
    ("a0f9e7", "Jim Carrey's Gulfstream V"),
];

/// Callsign prefixes that always alert inside the geofence.
pub const DEFAULT_CALLSIGN_WATCHLIST: &[(&str, &str)] = &[("CAP", "Civil Air Patrol")];

// ============================================================================
// Commercial carriers (ICAO airline designators)
// ============================================================================

pub const DEFAULT_CARRIER_PREFIXES: &[&str] = &[
    "AAL", // American Airlines
    "AAY", // Allegiant Air
    "ACA", // Air Canada
    "AFR", // Air France
    "AIC", // Air India
    "AMX", // Aeromexico
    "ANA", // All Nippon Airways
    "ASA", // Alaska Airlines
    "ASH", // Mesa Airlines
    "ATN", // Air Transport International (Cargo)
    "AWI", // Air Wisconsin
    "BAW", // British Airways
    "BTA", // Envoy Air
    "CFG", // Condor
    "CHQ", // Chautauqua Airlines
    "CPA", // Cathay Pacific
    "CRE", // Corporate Air (Cargo)
    "CXK", // Kalitta Charters (Cargo)
    "DAL", // Delta Air Lines
    "DLH", // Lufthansa
    "EIN", // Aer Lingus
    "EJA", // NetJets
    "EJM", // Executive Jet Management
    "ENY", // Envoy Air
    "ETD", // Etihad Airways
    "EZY", // easyJet
    "FDX", // FedEx (Cargo)
    "FDY", // Southern Airways Express
    "FFT", // Frontier Airlines
    "GES", // Gestair
    "GJS", // GoJet Airlines
    "ICE", // Icelandair
    "JAL", // Japan Airlines
    "JBU", // JetBlue Airways
    "JIA", // PSA Airlines
    "JRE", // flyExclusive
    "JSX", // JetSuiteX
    "JTL", // Jet Linx Aviation
    "JTZ", // Nicholas Air
    "KAL", // Korean Air
    "KLM", // KLM Royal Dutch Airlines
    "LOF", // Trans States Airlines
    "LXJ", // Flexjet
    "LYM", // Key Lime Air
    "MVJ", // Marvel Air Services
    "MXY", // Breeze Airways
    "NKS", // Spirit Airlines
    "PDT", // Piedmont Airlines
    "QFA", // Qantas
    "QXE", // Horizon Air
    "RPA", // Republic Airways
    "RYR", // Ryanair
    "SAS", // Scandinavian Airlines
    "SCX", // Sun Country Airlines
    "SIA", // Singapore Airlines
    "SKW", // SkyWest Airlines
    "SWA", // Southwest Airlines
    "SWQ", // Swift Air
    "THA", // Thai Airways
    "TSC", // Air Transat
    "TWY", // Solairus Aviation
    "UAL", // United Airlines
    "UAE", // Emirates
    "UJC", // Ultimate Jetcharters
    "UPS", // United Parcel Service (Cargo)
    "VIR", // Virgin Atlantic
    "VJA", // Vista America
    "VOI", // Volaris
    "VRD", // Virgin America
    "WJA", // WestJet
    "XSR", // Executive AirShare
];

// ============================================================================
// Military address blocks
// ============================================================================

/// ICAO 24-bit address blocks allocated to military operators, inclusive.
pub const DEFAULT_MILITARY_RANGES: &[(&str, &str)] = &[
    ("adf7c8", "afffff"),
    ("010070", "01008f"),
    ("0a4000", "0a4fff"),
    ("33ff00", "33ffff"),
    ("350000", "37ffff"),
    ("3aa000", "3affff"),
    ("3b7000", "3bffff"),
    ("3ea000", "3ebfff"),
    ("3f4000", "3fbfff"),
    ("400000", "40003f"),
    ("43c000", "43cfff"),
    ("444000", "446fff"),
    ("44f000", "44ffff"),
    ("457000", "457fff"),
    ("45f400", "45f4ff"),
    ("468000", "4683ff"),
    ("473c00", "473c0f"),
    ("478100", "4781ff"),
    ("480000", "480fff"),
    ("48d800", "48d87f"),
    ("497c00", "497cff"),
    ("498420", "49842f"),
    ("4b7000", "4b7fff"),
    ("4b8200", "4b82ff"),
    ("70c070", "70c07f"),
    ("710258", "71028f"),
    ("710380", "71039f"),
    ("738a00", "738aff"),
    ("7cf800", "7cfaff"),
    ("800200", "8002ff"),
    ("c20000", "c3ffff"),
    ("e40000", "e41fff"),
];

/// Largest valid 24-bit ICAO address.
pub const MAX_ICAO_ADDRESS: u32 = 0x00FF_FFFF;
