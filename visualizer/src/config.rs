use anyhow::Context;
use lunarcore::collection::HttpVehicleSource;
use lunarcore::map::renderer::DEFAULT_ZOOM;
use lunarcore::map::SceneProvider;
use lunarcore::map::tiles::DEFAULT_TILE_BASE;
use lunarcore::prelude::CommandCenterSettings;
use lunarcore::template::Template;
use lunarcore::{AppContext, ShellSettings};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const ITEM_TEMPLATE: &str = "{{name}}  {{model}}  {{power_level_percent}}%";
const DETAIL_TEMPLATE: &str = "{{name}}\nModel: {{model}}\nPower: {{power_level_percent}}%\nStatus: {{color}}\nPosition: {{coords.lat}}, {{coords.lng}}";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    pub item: String,
    pub detail: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            item: ITEM_TEMPLATE.into(),
            detail: DETAIL_TEMPLATE.into(),
        }
    }
}

/// Initial window size. Tiles are requested for the window until the first
/// resize reports the real one.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 700.0,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorConfig {
    pub api_base: String,
    pub vehicles_path: String,
    pub tile_base: String,
    pub zoom: u8,
    pub command_center: CommandCenterSettings,
    pub templates: TemplateConfig,
    /// Periodic merge fetch; `None` fetches once at startup.
    pub refresh_secs: Option<u64>,
    pub viewport: ViewportConfig,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            api_base: "http://127.0.0.1:8000".into(),
            vehicles_path: "/api/vehicles.json".into(),
            tile_base: DEFAULT_TILE_BASE.into(),
            zoom: DEFAULT_ZOOM,
            command_center: CommandCenterSettings::default(),
            templates: TemplateConfig::default(),
            refresh_secs: None,
            viewport: ViewportConfig::default(),
        }
    }
}

impl LocatorConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading locator config {}", path_ref.display()))?;
        let config: LocatorConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing locator config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn apply_overrides(&mut self, api_base: Option<String>, refresh_secs: Option<u64>) {
        if let Some(api_base) = api_base {
            self.api_base = api_base;
        }
        if refresh_secs.is_some() {
            self.refresh_secs = refresh_secs.filter(|secs| *secs > 0);
        }
    }

    /// Checks everything startup would reject by running the same startup
    /// the window performs against a throwaway scene.
    pub fn validate(&self, initial_route: &str) -> anyhow::Result<()> {
        Template::parse(&self.templates.item).context("compiling item template")?;
        Template::parse(&self.templates.detail).context("compiling detail template")?;
        HttpVehicleSource::resolve(&self.api_base, &self.vehicles_path)
            .context("resolving vehicles endpoint")?;
        AppContext::start(&self.to_shell_settings(initial_route), SceneProvider::new())
            .context("starting the locator")?;
        Ok(())
    }

    pub fn to_shell_settings(&self, initial_route: &str) -> ShellSettings {
        ShellSettings {
            api_base: self.api_base.clone(),
            vehicles_path: self.vehicles_path.clone(),
            tile_base: self.tile_base.clone(),
            zoom: self.zoom,
            command_center: self.command_center.clone(),
            item_template: self.templates.item.clone(),
            detail_template: self.templates.detail.clone(),
            initial_route: initial_route.to_string(),
        }
    }
}
