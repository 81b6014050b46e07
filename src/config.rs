//! Sample data fed to the [catalog](crate::catalog) demos -- loadable from `.ron` files.\
//! Every field has a default, so config files only need to state what they change.

use crate::{
    abstract_factory::Platform,
    adapter::BDT_TO_USD_RATE,
    builder::Laptop,
    types::PatternResult,
};
use std::path::Path;
use serde::{Serialize, Deserialize};
use ron::{
    Options,
    extensions::Extensions,
    ser::PrettyConfig,
};
use once_cell::sync::Lazy;


/// `Option`s may be written without the `Some(...)` wrapping
static RON_DESERIALIZER_CONFIG: Lazy<Options> = Lazy::new(|| Options::default()
    .with_default_extension(Extensions::IMPLICIT_SOME));

static RON_SERIALIZER_CONFIG: Lazy<PrettyConfig> = Lazy::new(|| PrettyConfig::new()
    .depth_limit(4)
    .separate_tuple_members(false)
    .enumerate_arrays(false));


#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub observer:        ObserverDemoConfig,
    /// `(notification type, message)` pairs given to the [NotificationFactory](crate::factory::NotificationFactory)
    pub notifications:   Vec<(String, String)>,
    /// the UI family to use -- `None` to detect it from the running OS
    pub ui_platform:     Option<Platform>,
    pub laptops:         Vec<Laptop>,
    /// name of the video the HDMI laptop will play
    pub video:           String,
    pub taka_amount:     f64,
    pub bdt_to_usd_rate: f64,
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct ObserverDemoConfig {
    pub product_name:  String,
    pub initial_price: i32,
    /// prices set, one after the other, on the product
    pub prices:        Vec<i32>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            observer:        ObserverDemoConfig::default(),
            notifications:   vec![
                (String::from("EMAIL"), String::from("Hello Factory Pattern!")),
                (String::from("SMS"),   String::from("Hello SMS!")),
                (String::from("PUSH"),  String::from("Hello Push Notification!")),
            ],
            ui_platform:     None,
            laptops:         vec![
                Laptop::builder()
                    .cpu("Intel i9")
                    .ram(32)
                    .storage(1000)
                    .gpu("RTX 4080")
                    .os("Windows 11")
                    .screen_type("OLED")
                    .build(),
                Laptop::builder()
                    .cpu("Intel i5")
                    .ram(8)
                    .storage(256)
                    .build(),
            ],
            video:           String::from("Movie.mp4"),
            taka_amount:     5000.0,
            bdt_to_usd_rate: BDT_TO_USD_RATE,
        }
    }
}

impl Default for ObserverDemoConfig {
    fn default() -> Self {
        Self {
            product_name:  String::from("product"),
            initial_price: 0,
            prices:        vec![100, 150, 200],
        }
    }
}

impl CatalogConfig {

    pub fn from_ron_str(ron_config: &str) -> PatternResult<Self> {
        RON_DESERIALIZER_CONFIG.from_str(ron_config)
            .map_err(|err| Box::from(format!("RON deserialization error for the catalog config: {}", err)))
    }

    pub fn load<P: AsRef<Path>>(config_file: P) -> PatternResult<Self> {
        let config_file = config_file.as_ref();
        let ron_config = std::fs::read_to_string(config_file)
            .map_err(|err| Box::<dyn std::error::Error + Send + Sync>::from(format!("Couldn't read the catalog config from '{}': {}", config_file.display(), err)))?;
        Self::from_ron_str(&ron_config)
    }

    pub fn to_ron_string(&self) -> PatternResult<String> {
        ron::ser::to_string_pretty(self, RON_SERIALIZER_CONFIG.clone())
            .map_err(|err| Box::from(format!("RON serialization error for the catalog config: {}", err)))
    }
}


/// Unit tests the [config](self) module
#[cfg(any(test,doc))]
mod tests {
    use super::*;

    #[cfg_attr(not(doc),test)]
    fn partial_configs_are_completed_with_defaults() {
        let config = CatalogConfig::from_ron_str(r#"(
            observer: (prices: [10, 10, 20]),
            ui_platform: Mac,
        )"#).expect("a partial config should be accepted");
        assert_eq!(config.observer.prices, vec![10, 10, 20], "prices weren't read");
        assert_eq!(config.observer.initial_price, 0, "the default initial price wasn't applied");
        assert_eq!(config.ui_platform, Some(Platform::Mac), "implicit `Some` wasn't honored");
        assert_eq!(config.video, "Movie.mp4", "the default video wasn't applied");
        assert_eq!(config.laptops.len(), 2, "the default laptops weren't applied");
    }

    #[cfg_attr(not(doc),test)]
    fn laptops_may_omit_optional_parts() {
        let config = CatalogConfig::from_ron_str(r#"(laptops: [(cpu: "M3", ram: 16)])"#)
            .expect("laptops with missing parts should be accepted");
        let laptop = &config.laptops[0];
        assert_eq!(laptop.cpu(), Some("M3"), "cpu wasn't read");
        assert_eq!(laptop.os(), "Windows", "the default OS wasn't applied");
        assert_eq!(laptop.storage(), 0, "missing storage should be zero");
    }

    #[cfg_attr(not(doc),test)]
    fn dumped_configs_are_loadable() {
        let config = CatalogConfig::default();
        let dumped = config.to_ron_string().expect("the default config should be serializable");
        let loaded = CatalogConfig::from_ron_str(&dumped).expect("a dumped config should be loadable");
        assert_eq!(loaded, config, "dumping & loading changed the config");
    }

    #[cfg_attr(not(doc),test)]
    fn malformed_configs_are_errors() {
        let err = CatalogConfig::from_ron_str("(observer: (prices: \"a lot\"))").expect_err("prices must be a list");
        assert!(err.to_string().starts_with("RON deserialization error"), "unexpected error: {err}");
        assert!(CatalogConfig::load("/this/file/does/not/exist.ron").is_err(), "missing files should be errors");
    }

}
