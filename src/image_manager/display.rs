//! Pure display helpers: quality bands, source colors and relevance badges.

use super::models::ImageRecord;
use crossterm::style::Color;
use serde::Serialize;

/// Badge colors used when rendering an image card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeColor {
    Green,
    Yellow,
    Red,
    Purple,
    Orange,
    Blue,
    Teal,
    Indigo,
    Gray,
}

impl BadgeColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeColor::Green => "green",
            BadgeColor::Yellow => "yellow",
            BadgeColor::Red => "red",
            BadgeColor::Purple => "purple",
            BadgeColor::Orange => "orange",
            BadgeColor::Blue => "blue",
            BadgeColor::Teal => "teal",
            BadgeColor::Indigo => "indigo",
            BadgeColor::Gray => "gray",
        }
    }

    /// Terminal color used by the command line tool.
    pub fn terminal_color(&self) -> Color {
        match self {
            BadgeColor::Green => Color::Rgb { r: 0, g: 200, b: 110 },
            BadgeColor::Yellow => Color::Rgb { r: 235, g: 200, b: 0 },
            BadgeColor::Red => Color::Rgb { r: 255, g: 85, b: 85 },
            BadgeColor::Purple => Color::Rgb { r: 180, g: 100, b: 255 },
            BadgeColor::Orange => Color::Rgb { r: 255, g: 165, b: 0 },
            BadgeColor::Blue => Color::Rgb { r: 100, g: 149, b: 237 },
            BadgeColor::Teal => Color::Rgb { r: 0, g: 180, b: 170 },
            BadgeColor::Indigo => Color::Rgb { r: 110, g: 90, b: 220 },
            BadgeColor::Gray => Color::Rgb { r: 128, g: 128, b: 128 },
        }
    }
}

/// Three-tier band a quality score falls into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityBand {
    Good,
    Medium,
    Low,
}

impl QualityBand {
    pub const GOOD_THRESHOLD: u32 = 90;
    pub const MEDIUM_THRESHOLD: u32 = 70;

    pub fn from_quality(quality: u32) -> Self {
        if quality >= Self::GOOD_THRESHOLD {
            QualityBand::Good
        } else if quality >= Self::MEDIUM_THRESHOLD {
            QualityBand::Medium
        } else {
            QualityBand::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityBand::Good => "good",
            QualityBand::Medium => "medium",
            QualityBand::Low => "low",
        }
    }

    pub fn color(&self) -> BadgeColor {
        match self {
            QualityBand::Good => BadgeColor::Green,
            QualityBand::Medium => BadgeColor::Yellow,
            QualityBand::Low => BadgeColor::Red,
        }
    }
}

/// Known image sources. Anything unrecognized falls into `Other`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ImageSource {
    CustomUpload,
    Ebay,
    Amazon,
    GoogleImages,
    BingImages,
    RockAuto,
    Manufacturer,
    Other,
}

impl ImageSource {
    /// Every source with a dedicated color, in the order the add form lists them.
    pub const KNOWN: [ImageSource; 7] = [
        ImageSource::CustomUpload,
        ImageSource::Ebay,
        ImageSource::Amazon,
        ImageSource::GoogleImages,
        ImageSource::BingImages,
        ImageSource::RockAuto,
        ImageSource::Manufacturer,
    ];

    /// Map a free-form source tag to a known source. Matching ignores case
    /// and surrounding whitespace.
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim();
        Self::KNOWN
            .into_iter()
            .find(|source| source.label().eq_ignore_ascii_case(tag))
            .unwrap_or(ImageSource::Other)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ImageSource::CustomUpload => "Custom Upload",
            ImageSource::Ebay => "eBay",
            ImageSource::Amazon => "Amazon",
            ImageSource::GoogleImages => "Google Images",
            ImageSource::BingImages => "Bing Images",
            ImageSource::RockAuto => "RockAuto",
            ImageSource::Manufacturer => "Manufacturer",
            ImageSource::Other => "Other",
        }
    }

    pub fn color(&self) -> BadgeColor {
        match self {
            ImageSource::CustomUpload => BadgeColor::Purple,
            ImageSource::Ebay => BadgeColor::Yellow,
            ImageSource::Amazon => BadgeColor::Orange,
            ImageSource::GoogleImages => BadgeColor::Blue,
            ImageSource::BingImages => BadgeColor::Teal,
            ImageSource::RockAuto => BadgeColor::Red,
            ImageSource::Manufacturer => BadgeColor::Indigo,
            ImageSource::Other => BadgeColor::Gray,
        }
    }
}

/// Pass/fail badge derived from the AI relevance verdict.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelevanceBadge {
    Relevant,
    NotRelevant,
}

impl RelevanceBadge {
    pub fn for_record(record: &ImageRecord) -> Option<Self> {
        record.ai_analysis.as_ref().map(|analysis| {
            if analysis.is_relevant {
                RelevanceBadge::Relevant
            } else {
                RelevanceBadge::NotRelevant
            }
        })
    }

    pub fn label(&self) -> &'static str {
        match self {
            RelevanceBadge::Relevant => "AI: relevant",
            RelevanceBadge::NotRelevant => "AI: not relevant",
        }
    }

    pub fn color(&self) -> BadgeColor {
        match self {
            RelevanceBadge::Relevant => BadgeColor::Green,
            RelevanceBadge::NotRelevant => BadgeColor::Red,
        }
    }
}

/// Everything needed to render one image card.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ImageBadges {
    pub quality: QualityBand,
    pub source: ImageSource,
    pub relevance: Option<RelevanceBadge>,
}

impl ImageBadges {
    pub fn for_record(record: &ImageRecord) -> Self {
        ImageBadges {
            quality: QualityBand::from_quality(record.quality),
            source: ImageSource::from_tag(&record.source),
            relevance: RelevanceBadge::for_record(record),
        }
    }
}
