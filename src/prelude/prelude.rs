//! See [super]

pub use crate::{
    instruments::Instruments,
    types::*,
    observer::{
        Subject,
        Observer,
        Observable,
        Product,
        ChangeEvent,
        PriceChangeEvent,
        DispatchMetrics,
        MobileApp,
        WebApp,
        on_change,
    },
    singleton::Singleton,
    factory::{Notification, NotificationKind, NotificationFactory},
    abstract_factory::{Button, Checkbox, CheckState, UiFactory, Platform, FactoryProducer},
    builder::{Laptop, LaptopBuilder},
    adapter::{Hdmi, HdmiLaptop, HdmiToVgaAdapter, VgaProjector, UsdPrice, TakaPriceProvider, TakaToUsdAdapter, DollarClient},
    config::CatalogConfig,
    catalog::Pattern,
};


/// Default [Product] for those who want its notifications delivered as fast as possible -- no logs, no counters
pub type QuietProduct = Product<{Instruments::NoInstruments.into()}>;

/// Default [Product] for debugging: logs every single delivery in the `TRACE` level
pub type TracedProduct = Product<{Instruments::Tracing.into()}>;
