//! # Configuration
//!
//! Loads matcher and camera parameters from a TOML file such as:
//!
//! ```toml
//! method = "vectorized"
//!
//! [matcher]
//! num_disparities = 64
//! block = 15
//! window = "centered"
//!
//! [camera]
//! baseline = 0.1
//! depth_unit = 0.001
//! focal_length_px = 1000.0
//! ```
//!
//! Every key is optional and falls back to its default.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use std::path::Path;

use serde::Deserialize;

use crate::depth::CameraParams;
use crate::disparity::Params;
use crate::error::*;

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub method: Method,
    pub matcher: Params,
    pub camera: CameraParams
}

// -----------------------------------------------------------------------------------------------
// ENUMERATIONS
// -----------------------------------------------------------------------------------------------

/// Which block matcher to run.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    Iterative,
    Vectorized
}

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl Default for Method {
    fn default() -> Self {
        Method::Vectorized
    }
}

impl std::str::FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "iterative" => Ok(Method::Iterative),
            "vectorized" => Ok(Method::Vectorized),
            other => Err(Error::InvalidConfiguration(format!("unknown method {:?}", other)))
        }
    }
}

impl Config {
    /// Read and validate a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigUnreadable {
            path: path.to_path_buf(),
            source
        })?;

        log::info!("Loaded configuration from {:?}", path);

        Self::from_toml_str(&text)
    }

    /// Parse and validate a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.matcher.validate()?;
        self.camera.validate()
    }
}
