use std::fmt;

use serde::{Deserialize, Serialize};

/// Binary fluency tag attached to every leaf in the output artifacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FluencyTag {
    /// Fluent (or plain) word, written as `_`
    #[serde(rename = "_")]
    Fluent,
    /// Disfluent word, written as `E`
    #[serde(rename = "E")]
    Disfluent,
}

impl FluencyTag {
    pub fn from_disfluent(disfluent: bool) -> Self {
        if disfluent {
            Self::Disfluent
        } else {
            Self::Fluent
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fluent => "_",
            Self::Disfluent => "E",
        }
    }

    pub fn is_disfluent(&self) -> bool {
        matches!(self, Self::Disfluent)
    }
}

impl fmt::Display for FluencyTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of syntactic span a leaf falls under in the structural pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpanKind {
    Plain,
    Edited,
    Intj,
    Prn,
}

impl SpanKind {
    /// Labels whose subtrees are tagged disfluent by the structural pass
    pub const SPECIAL_LABELS: [&'static str; 3] = ["EDITED", "INTJ", "PRN"];

    pub fn from_label(label: &str) -> Self {
        match label {
            "EDITED" => Self::Edited,
            "INTJ" => Self::Intj,
            "PRN" => Self::Prn,
            _ => Self::Plain,
        }
    }

    pub fn is_special(&self) -> bool {
        !matches!(self, Self::Plain)
    }

    /// Flatten to the two-symbol output alphabet
    pub fn tag(&self) -> FluencyTag {
        FluencyTag::from_disfluent(self.is_special())
    }
}

/// A leaf word paired with its fluency tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledLeaf {
    pub word: String,
    pub tag: FluencyTag,
}

impl LabeledLeaf {
    pub fn new(word: impl Into<String>, tag: FluencyTag) -> Self {
        Self {
            word: word.into(),
            tag,
        }
    }

    pub fn is_disfluent(&self) -> bool {
        self.tag.is_disfluent()
    }
}

impl fmt::Display for LabeledLeaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.word, self.tag)
    }
}

/// Render leaves as `word tag word tag ...`
pub fn format_leaves<'a>(leaves: impl IntoIterator<Item = &'a LabeledLeaf>) -> String {
    leaves
        .into_iter()
        .map(|leaf| leaf.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
