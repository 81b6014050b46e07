//! Runs the walkthrough of every pattern in this crate, with the sample data given by a [CatalogConfig],
//! returning the human-readable lines each of them produces (which are also output through the `log` facade).

use crate::{
    abstract_factory::FactoryProducer,
    adapter::{DollarClient, HdmiLaptop, HdmiToVgaAdapter, TakaPriceProvider, TakaToUsdAdapter, VgaProjector},
    config::{CatalogConfig, ObserverDemoConfig},
    factory::NotificationFactory,
    instruments::Instruments,
    observer::{MobileApp, Product, Subject, WebApp},
    singleton::Singleton,
    types::PatternResult,
};
use std::sync::Arc;
use strum_macros::{Display, EnumString, VariantNames};
use log::info;


/// The walkthroughs available
#[derive(Debug,Clone,Copy,PartialEq,Eq,Display,EnumString,VariantNames)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Pattern {
    All,
    Observer,
    Singleton,
    Factory,
    AbstractFactory,
    Builder,
    Adapter,
}

impl Pattern {
    /// every individual pattern, in the order [Pattern::All] runs them
    pub const INDIVIDUAL: [Pattern; 6] = [Pattern::Observer, Pattern::Singleton, Pattern::Factory, Pattern::AbstractFactory, Pattern::Builder, Pattern::Adapter];
}


/// Runs the walkthrough for `pattern` -- all of them, each one preceded by a header line, for [Pattern::All]
pub fn run(pattern: Pattern, config: &CatalogConfig) -> PatternResult<Vec<String>> {
    match pattern {
        Pattern::All => {
            let mut lines = Vec::new();
            for pattern in Pattern::INDIVIDUAL {
                lines.push(format!("=== {} ===", pattern));
                lines.extend(run(pattern, config)?);
            }
            Ok(lines)
        },
        Pattern::Observer        => observer_walkthrough(&config.observer),
        Pattern::Singleton       => Ok(singleton_walkthrough()),
        Pattern::Factory         => factory_walkthrough(config),
        Pattern::AbstractFactory => Ok(abstract_factory_walkthrough(config)),
        Pattern::Builder         => Ok(config.laptops.iter().map(|laptop| laptop.to_string()).collect()),
        Pattern::Adapter         => Ok(adapter_walkthrough(config)),
    }
}

/// Mobile & web front-ends watching the price of a product
fn observer_walkthrough(config: &ObserverDemoConfig) -> PatternResult<Vec<String>> {
    let product = Product::<{Instruments::LogsWithCounters.into()}>::new(config.product_name.as_str(), config.initial_price);
    let mobile = Arc::new(MobileApp::new());
    let web = Arc::new(WebApp::new());
    product.attach(mobile.clone());
    product.attach(web.clone());

    let mut lines = Vec::new();
    let (mut mobile_seen, mut web_seen) = (0, 0);
    for &price in &config.prices {
        product.set_state(price)?;
        // observers are notified in registration order: mobile first, then web
        let (mobile_messages, web_messages) = (mobile.messages(), web.messages());
        lines.extend_from_slice(&mobile_messages[mobile_seen..]);
        lines.extend_from_slice(&web_messages[web_seen..]);
        (mobile_seen, web_seen) = (mobile_messages.len(), web_messages.len());
    }
    let metrics = product.metrics();
    info!("Observer walkthrough: '{}' accepted {} price change(s), ignored {} and delivered {} notification(s)",
          product.name(), metrics.accepted_changes(), metrics.ignored_changes(), metrics.delivered_notifications());
    Ok(lines)
}

fn singleton_walkthrough() -> Vec<String> {
    let mut lines = Vec::new();
    if !Singleton::is_initialized() {
        lines.push(String::from("Singleton created"));
    }
    let s1 = Singleton::instance();
    let s2 = Singleton::instance();
    lines.push(std::ptr::eq(s1, s2).to_string());
    lines
}

fn factory_walkthrough(config: &CatalogConfig) -> PatternResult<Vec<String>> {
    let mut lines = Vec::with_capacity(config.notifications.len());
    for (notification_type, message) in &config.notifications {
        match NotificationFactory::create_notification(notification_type)? {
            Some(notification) => lines.push(notification.send(message)),
            None => lines.push(format!("No notification type given: '{}' was not sent", message)),
        }
    }
    Ok(lines)
}

fn abstract_factory_walkthrough(config: &CatalogConfig) -> Vec<String> {
    let factory = match config.ui_platform {
        Some(platform) => FactoryProducer::factory_for(platform),
        None => FactoryProducer::get_factory(),
    };
    let button = factory.create_button();
    let checkbox = factory.create_checkbox();
    let painted = button.paint();
    let checked = checkbox.toggle().is_checked();
    vec![painted, format!("Toggling {} Checkbox (now {})", factory.platform(), if checked {"checked"} else {"unchecked"})]
}

fn adapter_walkthrough(config: &CatalogConfig) -> Vec<String> {
    let laptop = HdmiLaptop::new(HdmiToVgaAdapter::new(VgaProjector));
    let mut lines = laptop.play_video(&config.video);
    let client = DollarClient::new(TakaToUsdAdapter::with_rate(TakaPriceProvider::new(config.taka_amount), config.bdt_to_usd_rate));
    lines.push(client.show_price());
    lines
}


/// Unit tests the [catalog](self) module
#[cfg(any(test,doc))]
mod tests {
    use super::*;
    use crate::abstract_factory::Platform;

    #[cfg_attr(not(doc),test)]
    fn observer_walkthrough_interleaves_front_ends() {
        let lines = run(Pattern::Observer, &CatalogConfig::default()).expect("the observer walkthrough failed");
        assert_eq!(lines, vec![
            "[Mobile] Price changed from 0 to 100",
            "[Web] Price changed from 0 to 100",
            "[Mobile] Price changed from 100 to 150",
            "[Web] Price changed from 100 to 150",
            "[Mobile] Price changed from 150 to 200",
            "[Web] Price changed from 150 to 200",
        ], "wrong observer walkthrough");
    }

    #[cfg_attr(not(doc),test)]
    fn repeated_prices_are_silent() {
        let mut config = CatalogConfig::default();
        config.observer.prices = vec![0, 7, 7, 0];
        let lines = run(Pattern::Observer, &config).expect("the observer walkthrough failed");
        assert_eq!(lines.len(), 4, "only the two real changes should be reported by both front-ends: {:?}", lines);
    }

    #[cfg_attr(not(doc),test)]
    fn forced_platforms_are_honored() {
        let config = CatalogConfig { ui_platform: Some(Platform::Mac), ..CatalogConfig::default() };
        let lines = run(Pattern::AbstractFactory, &config).expect("the abstract factory walkthrough failed");
        assert_eq!(lines, vec!["Rendering Mac Button", "Toggling Mac Checkbox (now checked)"], "wrong abstract factory walkthrough");
    }

    #[cfg_attr(not(doc),test)]
    fn unknown_notification_types_abort_the_walkthrough() {
        let config = CatalogConfig { notifications: vec![(String::from("FAX"), String::from("hi"))], ..CatalogConfig::default() };
        assert!(run(Pattern::Factory, &config).is_err(), "'FAX' is not a notification type");
        assert!(run(Pattern::All, &config).is_err(), "errors should propagate through `Pattern::All`");
    }

    #[cfg_attr(not(doc),test)]
    fn all_runs_every_pattern() {
        let lines = run(Pattern::All, &CatalogConfig::default()).expect("the complete walkthrough failed");
        for pattern in Pattern::INDIVIDUAL {
            assert!(lines.contains(&format!("=== {} ===", pattern)), "'{}' wasn't run", pattern);
        }
        assert!(lines.contains(&String::from("Sending SMS: Hello SMS!")), "factory lines are missing");
        assert!(lines.contains(&String::from("Displaying ANALOG video: Analog-Movie.mp4")), "adapter lines are missing");
        assert!(lines.contains(&String::from("true")), "singleton line is missing");
    }

    #[cfg_attr(not(doc),test)]
    fn patterns_parse_from_kebab_case() {
        assert_eq!("abstract-factory".parse::<Pattern>().expect("should parse"), Pattern::AbstractFactory);
        assert_eq!("Observer".parse::<Pattern>().expect("should parse"), Pattern::Observer);
        assert_eq!(Pattern::AbstractFactory.to_string(), "abstract-factory");
    }

}
