use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Error;

/// Physical page description. All values in PDF points.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub header_height: f32,
    pub footer_height: f32,
}

impl Default for PageGeometry {
    /// A4 portrait.
    fn default() -> Self {
        Self {
            page_width: 595.28,
            page_height: 841.89,
            margin_top: 40.0,
            margin_bottom: 40.0,
            margin_left: 40.0,
            margin_right: 40.0,
            header_height: 80.0,
            footer_height: 40.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Theme {
    pub accent: [u8; 3],
    pub text: [u8; 3],
    pub muted: [u8; 3],
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: [31, 78, 121],
            text: [33, 33, 33],
            muted: [110, 110, 110],
        }
    }
}

/// Optional TrueType files per style. Missing styles fall back to `regular`,
/// and a missing `regular` means the builtin Helvetica family.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FontFiles {
    pub regular: Option<PathBuf>,
    pub bold: Option<PathBuf>,
    pub italic: Option<PathBuf>,
    pub bold_italic: Option<PathBuf>,
}

impl FontFiles {
    pub fn is_empty(&self) -> bool {
        self.regular.is_none()
            && self.bold.is_none()
            && self.italic.is_none()
            && self.bold_italic.is_none()
    }

    /// Fill unset paths from `CONTRACT_PDF_FONT` and `CONTRACT_PDF_BOLD_FONT`.
    pub fn with_env_fallback(mut self) -> Self {
        if self.regular.is_none() {
            self.regular = std::env::var_os("CONTRACT_PDF_FONT").map(PathBuf::from);
        }
        if self.bold.is_none() {
            self.bold = std::env::var_os("CONTRACT_PDF_BOLD_FONT").map(PathBuf::from);
        }
        self
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContractOptions {
    pub page: PageGeometry,
    pub theme: Theme,
    pub fonts: FontFiles,
    pub currency_symbol: String,
    /// Attribution printed in every footer.
    pub generator: String,
    /// chrono format string for dates.
    pub date_format: String,
}

impl Default for ContractOptions {
    fn default() -> Self {
        Self {
            page: PageGeometry::default(),
            theme: Theme::default(),
            fonts: FontFiles::default(),
            currency_symbol: "€".to_string(),
            generator: concat!("Generated by contract-pdf ", env!("CARGO_PKG_VERSION")).to_string(),
            date_format: "%d/%m/%Y".to_string(),
        }
    }
}

impl ContractOptions {
    pub fn from_json_file(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
