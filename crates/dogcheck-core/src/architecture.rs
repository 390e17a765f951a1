use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// CNN architecture the classifier is asked to run.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Architecture {
    #[default]
    Vgg,
    Alexnet,
    Resnet,
}

impl Architecture {
    /// Every supported architecture, in report order.
    pub const ALL: [Architecture; 3] = [
        Architecture::Vgg,
        Architecture::Alexnet,
        Architecture::Resnet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Architecture::Vgg => "vgg",
            Architecture::Alexnet => "alexnet",
            Architecture::Resnet => "resnet",
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Architecture {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "vgg" => Ok(Architecture::Vgg),
            "alexnet" => Ok(Architecture::Alexnet),
            "resnet" => Ok(Architecture::Resnet),
            _ => Err(Error::UnknownArchitecture(value.to_string())),
        }
    }
}
