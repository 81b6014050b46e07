//! Making incompatible interfaces work together without touching either side:
//! the adapter implements the interface the client expects (X) and, internally, uses & converts what the
//! adaptee provides (Y).
//!
//! Two walkthroughs are provided:
//!   1. a digital HDMI [HdmiLaptop] playing video on an analog [VgaProjector], through [HdmiToVgaAdapter];
//!   2. a [DollarClient] showing prices that a [TakaPriceProvider] only knows in Bangladeshi Taka, through [TakaToUsdAdapter].

use log::info;


// HDMI -> VGA
//////////////

/// Target interface: what the [HdmiLaptop] knows how to talk to
pub trait Hdmi {
    /// Sends digital video `data`, returning the lines describing every step it went through
    fn transmit_digital_video(&self, data: &str) -> Vec<String>;
}

/// Adaptee: an old projector that only accepts analog signals
#[derive(Debug,Default)]
pub struct VgaProjector;

impl VgaProjector {
    pub fn show_analog_video(&self, data: &str) -> String {
        let line = format!("Displaying ANALOG video: {}", data);
        info!("{}", line);
        line
    }
}

/// Adapter: an [Hdmi] port that converts everything it receives & forwards it to a [VgaProjector]
#[derive(Debug)]
pub struct HdmiToVgaAdapter {
    vga_projector: VgaProjector,
}

impl HdmiToVgaAdapter {

    pub fn new(vga_projector: VgaProjector) -> Self {
        Self { vga_projector }
    }

    /// simulated digital to analog conversion
    fn convert_to_analog(digital_data: &str) -> String {
        format!("Analog-{}", digital_data)
    }
}

impl Hdmi for HdmiToVgaAdapter {
    fn transmit_digital_video(&self, data: &str) -> Vec<String> {
        let conversion = String::from("Adapter converting DIGITAL (HDMI) → ANALOG (VGA)...");
        info!("{}", conversion);
        let analog_data = Self::convert_to_analog(data);
        vec![conversion, self.vga_projector.show_analog_video(&analog_data)]
    }
}

/// Client: only understands [Hdmi] devices
pub struct HdmiLaptop<HdmiPort: Hdmi> {
    hdmi_port: HdmiPort,
}

impl<HdmiPort: Hdmi> HdmiLaptop<HdmiPort> {

    pub fn new(hdmi_port: HdmiPort) -> Self {
        Self { hdmi_port }
    }

    pub fn play_video(&self, video_data: &str) -> Vec<String> {
        let sending = String::from("Laptop sending DIGITAL video via HDMI...");
        info!("{}", sending);
        let mut lines = vec![sending];
        lines.extend(self.hdmi_port.transmit_digital_video(video_data));
        lines
    }
}


// TAKA -> USD
//////////////

/// Default Bangladeshi Taka to US Dollar exchange rate
pub const BDT_TO_USD_RATE: f64 = 0.0091;

/// Target interface: what the [DollarClient] wants
pub trait UsdPrice {
    fn price_in_usd(&self) -> f64;
}

/// Adaptee: provides prices in Taka only
#[derive(Debug,Clone,Copy)]
pub struct TakaPriceProvider {
    taka: f64,
}

impl TakaPriceProvider {

    pub fn new(taka: f64) -> Self {
        Self { taka }
    }

    pub fn taka(&self) -> f64 {
        self.taka
    }
}

/// Adapter: implements [UsdPrice], using a [TakaPriceProvider] & converting its prices with `bdt_to_usd_rate`
#[derive(Debug)]
pub struct TakaToUsdAdapter {
    taka_provider:   TakaPriceProvider,
    bdt_to_usd_rate: f64,
}

impl TakaToUsdAdapter {

    /// Converts with the default [BDT_TO_USD_RATE]
    pub fn new(taka_provider: TakaPriceProvider) -> Self {
        Self::with_rate(taka_provider, BDT_TO_USD_RATE)
    }

    pub fn with_rate(taka_provider: TakaPriceProvider, bdt_to_usd_rate: f64) -> Self {
        Self { taka_provider, bdt_to_usd_rate }
    }
}

impl UsdPrice for TakaToUsdAdapter {
    fn price_in_usd(&self) -> f64 {
        let taka = self.taka_provider.taka();
        let usd = taka * self.bdt_to_usd_rate;
        info!("Converting TAKA (Y) → USD (X)...");
        info!("TAKA {} × {} = USD {}", taka, self.bdt_to_usd_rate, usd);
        usd
    }
}

/// Client: wants only USD
pub struct DollarClient<Price: UsdPrice> {
    price: Price,
}

impl<Price: UsdPrice> DollarClient<Price> {

    pub fn new(price: Price) -> Self {
        Self { price }
    }

    pub fn show_price(&self) -> String {
        let line = format!("Final Price in USD: {}", self.price.price_in_usd());
        info!("{}", line);
        line
    }
}


/// Unit tests the [adapter](self) module
#[cfg(any(test,doc))]
mod tests {
    use super::*;

    #[cfg_attr(not(doc),test)]
    fn hdmi_laptops_play_on_vga_projectors() {
        let laptop = HdmiLaptop::new(HdmiToVgaAdapter::new(VgaProjector));
        assert_eq!(laptop.play_video("Movie.mp4"), vec![
            "Laptop sending DIGITAL video via HDMI...",
            "Adapter converting DIGITAL (HDMI) → ANALOG (VGA)...",
            "Displaying ANALOG video: Analog-Movie.mp4",
        ], "wrong video path");
    }

    #[cfg_attr(not(doc),test)]
    fn taka_prices_are_shown_in_usd() {
        let adapter = TakaToUsdAdapter::new(TakaPriceProvider::new(5000.0));
        assert!((adapter.price_in_usd() - 45.5).abs() < 1e-9, "wrong conversion with the default rate");
        let client = DollarClient::new(TakaToUsdAdapter::with_rate(TakaPriceProvider::new(200.0), 0.5));
        assert_eq!(client.show_price(), "Final Price in USD: 100", "wrong client rendering");
    }

}
