//! Sample [Observer]s for [Product](super::Product) price changes -- each one renders & keeps the lines it outputs

use super::subject::{Observer, PriceChangeEvent};
use crate::types::PatternResult;
use parking_lot::Mutex;
use log::info;


/// Renders a price change the way the front-ends of the catalog show it to their users
fn render(channel: &str, event: &PriceChangeEvent) -> String {
    format!("[{}] Price changed from {} to {}", channel, event.old_value(), event.new_value())
}

/// Defines [Observer]s that output a line -- through the `log` facade -- for every price change & remember them
macro_rules! impl_price_observer {
    ($type_name: ident, $channel: literal) => {

        #[derive(Debug,Default)]
        pub struct $type_name {
            messages: Mutex<Vec<String>>,
        }

        impl $type_name {

            pub fn new() -> Self {
                Self::default()
            }

            /// every line output so far, in the order they were produced
            pub fn messages(&self) -> Vec<String> {
                self.messages.lock().clone()
            }
        }

        impl Observer<i32> for $type_name {
            fn update(&self, event: &PriceChangeEvent) -> PatternResult<()> {
                let message = render($channel, event);
                info!("{}", message);
                self.messages.lock().push(message);
                Ok(())
            }
        }
    }
}

impl_price_observer!(MobileApp, "Mobile");
impl_price_observer!(WebApp,    "Web");


/// Unit tests the [observers](self) module
#[cfg(any(test,doc))]
mod tests {
    use super::*;

    #[cfg_attr(not(doc),test)]
    fn price_changes_are_rendered_per_channel() {
        let mobile = MobileApp::new();
        let web = WebApp::new();
        let event = PriceChangeEvent::new(100, 150);
        mobile.update(&event).expect("MobileApp never fails");
        web.update(&event).expect("WebApp never fails");
        assert_eq!(mobile.messages(), vec!["[Mobile] Price changed from 100 to 150"], "wrong mobile rendering");
        assert_eq!(web.messages(),    vec!["[Web] Price changed from 100 to 150"],    "wrong web rendering");
    }

}
