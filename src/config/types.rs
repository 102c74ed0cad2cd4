use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::models::{default_missions, Mission};

pub const DEFAULT_CATALOG_PATH: &str = "products.csv";
pub const DEFAULT_CONFIG_FILE: &str = "shopmission.yaml";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ShopConfig {
    pub catalog: Option<PathBuf>,
    pub missions: Option<Vec<Mission>>,
    pub fetch: Option<FetchConfig>,
    pub report: Option<ReportConfig>,
    pub session_file: Option<PathBuf>,
}

impl ShopConfig {
    pub fn catalog_path(&self) -> PathBuf {
        self.catalog
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_PATH))
    }

    /// Configured missions, or the built-in set when the file lists none.
    pub fn missions(&self) -> Vec<Mission> {
        match &self.missions {
            Some(missions) if !missions.is_empty() => missions.clone(),
            _ => default_missions(),
        }
    }

    pub fn fetch(&self) -> FetchConfig {
        self.fetch.clone().unwrap_or_default()
    }

    pub fn report(&self) -> ReportConfig {
        self.report.clone().unwrap_or_default()
    }

    pub fn session_file(&self) -> PathBuf {
        self.session_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(".shopmission/session.json"))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FetchConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_thumbnail_size")]
    pub thumbnail_size: u32,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout_secs() -> u64 {
    7
}

fn default_thumbnail_size() -> u32 {
    120
}

fn default_user_agent() -> String {
    format!("shopmission/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            thumbnail_size: default_thumbnail_size(),
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Candidate font files, tried in order.
    #[serde(default = "default_font_candidates")]
    pub fonts: Vec<PathBuf>,
    #[serde(default = "default_max_reason_lines")]
    pub max_reason_lines: usize,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./results")
}

fn default_max_reason_lines() -> usize {
    20
}

pub fn default_font_candidates() -> Vec<PathBuf> {
    [
        "fonts/NanumHumanRegular.ttf",
        "fonts/NotoSansCJK-Regular.otf",
        "fonts/NotoSansKR-Regular.otf",
        "fonts/NanumGothic.ttf",
        "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        "/System/Library/Fonts/AppleGothic.ttf",
        "C:/Windows/Fonts/malgun.ttf",
        "C:/Windows/Fonts/NanumGothic.ttf",
    ]
    .iter()
    .map(PathBuf::from)
    .collect()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            fonts: default_font_candidates(),
            max_reason_lines: default_max_reason_lines(),
        }
    }
}
