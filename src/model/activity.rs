//! Activity categories detected from event text.

/// Category of a clan activity. Drives the embed color and the default capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityType {
    Raid,
    Dungeon,
    PvP,
    Gambit,
    Nightfall,
    Exotic,
    Seasonal,
    Other,
}

const RAID_KEYWORDS: &[&str] = &[
    "raid",
    "king's fall",
    "kings fall",
    "kf",
    "oryx",
    "crota",
    "crota's end",
    "crotas end",
    "vault of glass",
    "vog",
    "last wish",
    "lw",
    "riven",
    "garden of salvation",
    "gos",
    "deep stone crypt",
    "dsc",
    "vow of the disciple",
    "vod",
    "root of nightmares",
    "ron",
    "salvation's edge",
    "salvations edge",
    "queda do rei",
    "câmara de cristal",
    "camara de cristal",
    "último desejo",
    "ultimo desejo",
    "jardim da salvação",
    "cripta da pedra profunda",
    "voto do discípulo",
    "raiz dos pesadelos",
    "limiar da salvação",
];

const DUNGEON_KEYWORDS: &[&str] = &[
    "dungeon",
    "masmorra",
    "prophecy",
    "profecia",
    "shattered throne",
    "trono estilhaçado",
    "pit of heresy",
    "poh",
    "poço da heresia",
    "duality",
    "dualidade",
    "spire of the watcher",
    "sotw",
    "ghosts of the deep",
    "gotd",
    "warlord's ruin",
    "warlords ruin",
    "vesper's host",
    "vesper",
    "sundered doctrine",
    "doutrina apartada",
];

const PVP_KEYWORDS: &[&str] = &[
    "pvp",
    "trials",
    "trials of osiris",
    "osiris",
    "desafios de osíris",
    "crucible",
    "iron banner",
];

const GAMBIT_KEYWORDS: &[&str] = &["gambit"];

const NIGHTFALL_KEYWORDS: &[&str] = &[
    "nightfall",
    "anoitecer",
    "grandmaster",
    "gm",
];

const EXOTIC_KEYWORDS: &[&str] = &[
    "exotic mission",
    "exotic",
    "missão exótica",
    "missao exotica",
    "exótica",
    "exotica",
];

const SEASONAL_KEYWORDS: &[&str] = &["seasonal", "sazonal", "onslaught", "sobrecarga"];

impl ActivityType {
    const DETECTION_ORDER: [(ActivityType, &'static [&'static str]); 7] = [
        (Self::Raid, RAID_KEYWORDS),
        (Self::Dungeon, DUNGEON_KEYWORDS),
        (Self::PvP, PVP_KEYWORDS),
        (Self::Gambit, GAMBIT_KEYWORDS),
        (Self::Nightfall, NIGHTFALL_KEYWORDS),
        (Self::Exotic, EXOTIC_KEYWORDS),
        (Self::Seasonal, SEASONAL_KEYWORDS),
    ];

    /// Detects the category from whole-word keyword matches in the title and description.
    ///
    /// Categories are tried in a fixed order and the first match wins. Text with no known
    /// keyword is `Other`.
    pub fn detect(title: &str, description: Option<&str>) -> Self {
        let text = format!("{} {}", title, description.unwrap_or_default()).to_lowercase();

        Self::DETECTION_ORDER
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| contains_word(&text, k)))
            .map(|(activity, _)| *activity)
            .unwrap_or(Self::Other)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Raid => "Raid",
            Self::Dungeon => "Dungeon",
            Self::PvP => "PvP",
            Self::Gambit => "Gambit",
            Self::Nightfall => "Nightfall",
            Self::Exotic => "Exotic",
            Self::Seasonal => "Seasonal",
            Self::Other => "Other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::DETECTION_ORDER
            .iter()
            .map(|(activity, _)| *activity)
            .chain(std::iter::once(Self::Other))
            .find(|activity| activity.as_str().eq_ignore_ascii_case(value))
    }

    /// Fireteam size used when the creator leaves capacity blank.
    pub fn default_capacity(&self) -> i32 {
        match self {
            Self::Dungeon | Self::PvP => 3,
            _ => 6,
        }
    }

    pub fn color(&self) -> u32 {
        match self {
            Self::Raid => 0x9b59b6,
            Self::Dungeon => 0xe67e22,
            Self::PvP => 0xe74c3c,
            Self::Gambit => 0x2ecc71,
            Self::Nightfall | Self::Seasonal => 0x1abc9c,
            Self::Exotic => 0xf1c40f,
            Self::Other => 0x95a5a6,
        }
    }
}

/// Color for a stored activity label. Labels that no longer map to a category fall back
/// to blue.
pub fn color_for_label(label: &str) -> u32 {
    ActivityType::parse(label)
        .map(|a| a.color())
        .unwrap_or(0x3498db)
}

/// Whether `needle` occurs in `haystack` delimited by non-alphanumeric characters.
fn contains_word(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(start, matched)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + matched.len()..].chars().next();

        !before.is_some_and(|c| c.is_alphanumeric()) && !after.is_some_and(|c| c.is_alphanumeric())
    })
}
