use std::sync::OnceLock;

static BUILTIN_ZONES: OnceLock<ZoneTable> = OnceLock::new();

/// Built-in micro-area partition, grouped by zone
const BANGALORE_ZONES: &[(&str, &[&str])] = &[
    (
        "central",
        &[
            "mg road",
            "brigade road",
            "church street",
            "residency road",
            "richmond road",
            "lavelle road",
            "ub city",
            "cunningham road",
            "shivajinagar",
            "commercial street",
        ],
    ),
    (
        "south_east",
        &[
            "koramangala",
            "hsr layout",
            "hsr",
            "btm layout",
            "btm",
            "bellandur",
            "sarjapur road",
            "electronic city",
            "madiwala",
        ],
    ),
    (
        "south",
        &[
            "jayanagar",
            "jp nagar",
            "banashankari",
            "basavanagudi",
            "bannerghatta road",
            "kanakapura road",
        ],
    ),
    (
        "east",
        &[
            "whitefield",
            "marathahalli",
            "indiranagar",
            "domlur",
            "kr puram",
            "mahadevapura",
            "brookefield",
            "itpl",
            "old airport road",
        ],
    ),
    (
        "north",
        &[
            "hebbal",
            "yelahanka",
            "rt nagar",
            "sahakara nagar",
            "manyata tech park",
            "thanisandra",
            "kalyan nagar",
        ],
    ),
    (
        "west",
        &[
            "rajajinagar",
            "malleshwaram",
            "vijayanagar",
            "yeshwanthpur",
            "basaveshwaranagar",
            "peenya",
        ],
    ),
];

/// Split text into lowercase alphanumeric tokens
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Whole-token phrase containment: `needle` must appear as a contiguous run
/// of complete tokens in `haystack`, so "nagar" never matches "jayanagar".
#[inline]
pub fn contains_phrase(haystack: &[String], needle: &[String]) -> bool {
    !needle.is_empty()
        && needle.len() <= haystack.len()
        && haystack.windows(needle.len()).any(|window| window == needle)
}

#[derive(Debug, Clone)]
struct ZoneKeyword {
    tokens: Vec<String>,
    zone: String,
}

/// Static mapping of micro-area keywords to named zones
#[derive(Debug, Clone)]
pub struct ZoneTable {
    // Longest phrases first, so "hsr layout" wins over "hsr"
    keywords: Vec<ZoneKeyword>,
}

impl ZoneTable {
    pub fn new(zones: &[(&str, &[&str])]) -> Self {
        let mut keywords: Vec<ZoneKeyword> = zones
            .iter()
            .flat_map(|(zone, areas)| {
                areas.iter().map(move |area| ZoneKeyword {
                    tokens: tokenize(area),
                    zone: (*zone).to_string(),
                })
            })
            .filter(|keyword| !keyword.tokens.is_empty())
            .collect();

        keywords.sort_by(|a, b| b.tokens.len().cmp(&a.tokens.len()));

        Self { keywords }
    }

    /// The process-wide table, built on first use
    pub fn builtin() -> &'static ZoneTable {
        BUILTIN_ZONES.get_or_init(|| ZoneTable::new(BANGALORE_ZONES))
    }

    /// Zone of the first (longest) keyword found in `text`
    pub fn resolve(&self, text: &str) -> Option<&str> {
        self.resolve_tokens(&tokenize(text))
    }

    pub fn resolve_tokens(&self, tokens: &[String]) -> Option<&str> {
        self.keywords
            .iter()
            .find(|keyword| contains_phrase(tokens, &keyword.tokens))
            .map(|keyword| keyword.zone.as_str())
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}
