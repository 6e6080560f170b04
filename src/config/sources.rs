//! Source fetching and noise filtering configuration

use serde::{Deserialize, Serialize};

use super::DEFAULT_USER_AGENT;

/// Boilerplate terms that mark a fragment as template chrome (es-AR sites)
pub const DEFAULT_NOISE_TERMS: &[&str] = &[
    "publicidad",
    "anuncio",
    "cookies",
    "política de privacidad",
    "politica de privacidad",
    "términos y condiciones",
    "terminos y condiciones",
    "todos los derechos reservados",
    "copyright",
    "©",
    "iniciar sesión",
    "iniciar sesion",
    "registrate",
    "suscribite",
    "hacé click",
    "haga clic",
    "click aquí",
    "clic aquí",
    "ver más",
    "volver al inicio",
    "buscar otro",
    "nueva búsqueda",
    "datuar",
    "cuitonline",
    "dateas",
];

/// Outbound request settings shared by every source
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Per-source deadline for the whole request (seconds)
    pub timeout_secs: u64,
    /// TCP/TLS connect deadline (seconds)
    pub connect_timeout_secs: u64,
    /// Browser user agent sent to every site
    pub user_agent: String,
    /// Responses larger than this are rejected
    pub max_body_bytes: usize,
    pub datuar: SiteConfig,
    pub cuitonline: SiteConfig,
    pub dateas: SiteConfig,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 8,
            connect_timeout_secs: 5,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_body_bytes: 5 * 1024 * 1024,
            datuar: SiteConfig::default(),
            cuitonline: SiteConfig::default(),
            dateas: SiteConfig::default(),
        }
    }
}

impl SourcesConfig {
    /// Site settings in registration order
    pub fn sites(&self) -> [(&'static str, &SiteConfig); 3] {
        [
            ("datuar", &self.datuar),
            ("cuitonline", &self.cuitonline),
            ("dateas", &self.dateas),
        ]
    }
}

/// Per-site overrides. Unset fields fall back to the site's built-in profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub enabled: bool,
    /// Scheme and host to query, e.g. "https://datuar.com"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by_length: Option<bool>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: None,
            max_items: None,
            sort_by_length: None,
        }
    }
}

/// Noise filter tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    /// Case-insensitive boilerplate terms
    pub terms: Vec<String>,
    /// Fragments shorter than this are garbage
    pub min_length: usize,
    /// Digit/punctuation-only fragments shorter than this are garbage
    pub numeric_min_length: usize,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            terms: DEFAULT_NOISE_TERMS.iter().map(|t| t.to_string()).collect(),
            min_length: 3,
            numeric_min_length: 5,
        }
    }
}
