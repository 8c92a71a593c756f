use serde::{Deserialize, Serialize};
use std::fmt;

/// Region of the site a change request points at. The widget's select box
/// only offers the named variants; values outside that set still round-trip
/// verbatim through `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SiteArea {
    Header,
    Hero,
    About,
    Approach,
    Listings,
    Testimonials,
    Contact,
    Footer,
    Colors,
    Fonts,
    Images,
    Overall,
    Other,
    Unknown(String),
}

impl SiteArea {
    pub fn as_str(&self) -> &str {
        match self {
            SiteArea::Header => "header",
            SiteArea::Hero => "hero",
            SiteArea::About => "about",
            SiteArea::Approach => "approach",
            SiteArea::Listings => "listings",
            SiteArea::Testimonials => "testimonials",
            SiteArea::Contact => "contact",
            SiteArea::Footer => "footer",
            SiteArea::Colors => "colors",
            SiteArea::Fonts => "fonts",
            SiteArea::Images => "images",
            SiteArea::Overall => "overall",
            SiteArea::Other => "other",
            SiteArea::Unknown(value) => value.as_str(),
        }
    }
}

impl fmt::Display for SiteArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for SiteArea {
    fn from(value: &str) -> Self {
        match value {
            "header" => SiteArea::Header,
            "hero" => SiteArea::Hero,
            "about" => SiteArea::About,
            "approach" => SiteArea::Approach,
            "listings" => SiteArea::Listings,
            "testimonials" => SiteArea::Testimonials,
            "contact" => SiteArea::Contact,
            "footer" => SiteArea::Footer,
            "colors" => SiteArea::Colors,
            "fonts" => SiteArea::Fonts,
            "images" => SiteArea::Images,
            "overall" => SiteArea::Overall,
            "other" => SiteArea::Other,
            other => SiteArea::Unknown(other.to_string()),
        }
    }
}

impl From<String> for SiteArea {
    fn from(value: String) -> Self {
        SiteArea::from(value.as_str())
    }
}

impl From<SiteArea> for String {
    fn from(value: SiteArea) -> Self {
        value.as_str().to_string()
    }
}
