//! Waste category pictograms.
//!
//! A free-text category label such as `"Mad og glas"` is matched against a fixed keyword
//! table by case-insensitive substring search. Every hit contributes its icon identifier
//! once, in table order.

/// Identifier used when no keyword matches.
pub const FALLBACK_ICON: &str = "restaffald";
/// URL prefix of the static icon files.
pub const ICON_URL_PREFIX: &str = "/api/affaldsafhentning/icons";
/// URL of the composite picture endpoint.
pub const IMAGE_URL: &str = "/api/affaldsafhentning/image";

const GENERIC_PLASTIC: &str = "plast";
const SPECIFIC_PLASTICS: [&str; 2] = ["haard_plast", "bloed_plast_2"];

/// Keyword to icon identifier, in priority order.
pub const KEYWORD_ICONS: [(&str, &str); 12] = [
    ("rest", "restaffald"),
    ("mad", "madaffald"),
    ("plast", "plast"),
    ("glas", "glas"),
    ("metal", "metal"),
    ("papir", "papir"),
    ("pap", "pap"),
    ("tekstil", "tekstilaffald"),
    ("karton", "mad_og_drikkekartoner"),
    ("farligt", "farligt_affald"),
    ("hård plast", "haard_plast"),
    ("blød plast", "bloed_plast_2"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
/// Ordered, duplicate-free icon identifiers; never empty.
pub struct IconSelection(Vec<String>);

impl IconSelection {
    /// The identifiers in display order.
    #[must_use]
    pub fn identifiers(&self) -> &[String] {
        &self.0
    }

    /// Static asset for a single icon, composite request for several.
    #[must_use]
    pub fn picture(&self) -> EntityPicture {
        match self.0.as_slice() {
            [single] => EntityPicture::Static(single.clone()),
            identifiers => EntityPicture::Composite(identifiers.to_vec()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// How a category picture is served.
pub enum EntityPicture {
    /// One pre-existing icon file.
    Static(String),
    /// Several icons drawn side by side on request.
    Composite(Vec<String>),
}

impl EntityPicture {
    /// Relative URL of the picture.
    #[must_use]
    pub fn url(&self) -> String {
        match self {
            Self::Static(identifier) => format!("{ICON_URL_PREFIX}/{identifier}.jpg"),
            Self::Composite(identifiers) => format!("{IMAGE_URL}?images={}", identifiers.join(",")),
        }
    }
}

/// Icons for a waste category label.
#[must_use]
pub fn resolve_icons(waste_type_label: &str) -> IconSelection {
    let label = waste_type_label.to_lowercase();

    let mut found: Vec<String> = Vec::new();
    for (keyword, icon) in KEYWORD_ICONS {
        if label.contains(keyword) && !found.iter().any(|seen| seen == icon) {
            found.push(icon.to_owned());
        }
    }

    // "plast" is a substring of the specific plastic keywords.
    if found
        .iter()
        .any(|icon| SPECIFIC_PLASTICS.contains(&icon.as_str()))
    {
        found.retain(|icon| icon != GENERIC_PLASTIC);
    }

    if found.is_empty() {
        found.push(FALLBACK_ICON.to_owned());
    }
    IconSelection(found)
}
