use serde::{Deserialize, Serialize};

/// Heading levels that take part in the table of contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum HeadingLevel {
    H2,
    H3,
}

impl HeadingLevel {
    pub fn as_u8(self) -> u8 {
        match self {
            Self::H2 => 2,
            Self::H3 => 3,
        }
    }
}

impl From<HeadingLevel> for u8 {
    fn from(level: HeadingLevel) -> Self {
        level.as_u8()
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = anyhow::Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Self::H2),
            3 => Ok(Self::H3),
            other => Err(anyhow::anyhow!("unsupported heading level: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocItem {
    pub id: String,
    pub text: String,
    pub level: HeadingLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedContent {
    pub processed_html: String,
    pub toc_items: Vec<TocItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonLdSplit {
    pub cleaned_html: String,
    pub json_ld_blocks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedPost {
    pub html: String,
    pub toc_items: Vec<TocItem>,
    pub json_ld_blocks: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toc_item_serializes_level_as_number() -> anyhow::Result<()> {
        let item = TocItem {
            id: "overview".to_owned(),
            text: "Overview".to_owned(),
            level: HeadingLevel::H2,
        };
        let json = serde_json::to_string(&item)?;
        assert_eq!(json, r#"{"id":"overview","text":"Overview","level":2}"#);
        Ok(())
    }

    #[test]
    fn toc_item_rejects_unsupported_level() {
        let parsed = serde_json::from_str::<TocItem>(r#"{"id":"a","text":"A","level":4}"#);
        assert!(parsed.is_err());
    }
}
