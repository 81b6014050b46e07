//! Families of UI components for multiple platforms, created without the client code ever naming a concrete type.
//!
//! Each role ([Button], [Checkbox]) is a capability set; each platform contributes one type per role and a
//! [UiFactory] that builds its whole family. The family is picked once, by [FactoryProducer], when the factory
//! is constructed.

use std::sync::atomic::Ordering::{Acquire, AcqRel};
use atomic_enum::atomic_enum;
use strum_macros::{Display, EnumString};
use log::{debug, info};


/// Platforms we have UI component families for
#[derive(Debug,Clone,Copy,PartialEq,Eq,Display,EnumString,serde::Serialize,serde::Deserialize)]
#[strum(ascii_case_insensitive)]
pub enum Platform {
    Mac,
    Windows,
}

/// will derive `AtomicCheckState`
#[atomic_enum]
#[derive(PartialEq)]
pub enum CheckState {
    Unchecked,
    Checked,
}

impl CheckState {

    pub fn is_checked(&self) -> bool {
        matches!(self, CheckState::Checked)
    }

    fn flipped(&self) -> Self {
        match self {
            CheckState::Unchecked => CheckState::Checked,
            CheckState::Checked   => CheckState::Unchecked,
        }
    }
}


pub trait Button: Send + Sync {
    /// Renders the button, returning what was drawn
    fn paint(&self) -> String;
}

pub trait Checkbox: Send + Sync {
    /// Flips the checkbox, returning the new state
    fn toggle(&self) -> CheckState;
    fn state(&self) -> CheckState;
}

/// Builds a complete, coherent family of components
pub trait UiFactory: Send + Sync {
    fn create_button(&self) -> Box<dyn Button>;
    fn create_checkbox(&self) -> Box<dyn Checkbox>;
    fn platform(&self) -> Platform;
}


/// Defines a [Button] for a platform, whose painting is simulated by logging `Rendering <Platform> Button`
macro_rules! impl_button {
    ($type_name: ident, $platform_label: literal) => {
        #[derive(Debug,Default)]
        pub struct $type_name;
        impl Button for $type_name {
            fn paint(&self) -> String {
                let line = format!("Rendering {} Button", $platform_label);
                info!("{}", line);
                line
            }
        }
    }
}

/// Defines a lock-free [Checkbox] for a platform, logging `Toggling <Platform> Checkbox` on every toggle
macro_rules! impl_checkbox {
    ($type_name: ident, $platform_label: literal) => {
        pub struct $type_name {
            state: AtomicCheckState,
        }
        impl Default for $type_name {
            fn default() -> Self {
                Self { state: AtomicCheckState::new(CheckState::Unchecked) }
            }
        }
        impl Checkbox for $type_name {
            fn toggle(&self) -> CheckState {
                info!("Toggling {} Checkbox", $platform_label);
                let mut current = self.state.load(Acquire);
                loop {
                    let next = current.flipped();
                    match self.state.compare_exchange(current, next, AcqRel, Acquire) {
                        Ok(_) => break next,
                        Err(reloaded_current) => current = reloaded_current,
                    }
                }
            }
            fn state(&self) -> CheckState {
                self.state.load(Acquire)
            }
        }
    }
}

impl_button!(MacButton, "Mac");
impl_checkbox!(MacCheckbox, "Mac");
impl_button!(WinButton, "Windows");
impl_checkbox!(WinCheckbox, "Windows");


#[derive(Debug,Default)]
pub struct MacUiFactory;
impl UiFactory for MacUiFactory {
    fn create_button(&self) -> Box<dyn Button> {
        Box::new(MacButton)
    }
    fn create_checkbox(&self) -> Box<dyn Checkbox> {
        Box::new(MacCheckbox::default())
    }
    fn platform(&self) -> Platform {
        Platform::Mac
    }
}

#[derive(Debug,Default)]
pub struct WinUiFactory;
impl UiFactory for WinUiFactory {
    fn create_button(&self) -> Box<dyn Button> {
        Box::new(WinButton)
    }
    fn create_checkbox(&self) -> Box<dyn Checkbox> {
        Box::new(WinCheckbox::default())
    }
    fn platform(&self) -> Platform {
        Platform::Windows
    }
}


/// Picks the [UiFactory] family
pub struct FactoryProducer;

impl FactoryProducer {

    pub fn factory_for(platform: Platform) -> Box<dyn UiFactory> {
        match platform {
            Platform::Mac     => Box::new(MacUiFactory),
            Platform::Windows => Box::new(WinUiFactory),
        }
    }

    /// Mac for any OS name containing "mac" (case-insensitive); Windows for anything else
    pub fn factory_for_os_name(os_name: &str) -> Box<dyn UiFactory> {
        let platform = if os_name.to_lowercase().contains("mac") { Platform::Mac } else { Platform::Windows };
        debug!("FactoryProducer: OS '{}' will get the {} UI family", os_name, platform);
        Self::factory_for(platform)
    }

    /// The family for the OS we're running on
    pub fn get_factory() -> Box<dyn UiFactory> {
        Self::factory_for_os_name(std::env::consts::OS)
    }
}


/// Unit tests the [abstract_factory](self) module
#[cfg(any(test,doc))]
mod tests {
    use super::*;

    #[cfg_attr(not(doc),test)]
    fn families_are_coherent() {
        let mac = FactoryProducer::factory_for(Platform::Mac);
        assert_eq!(mac.platform(), Platform::Mac, "wrong family");
        assert_eq!(mac.create_button().paint(), "Rendering Mac Button", "wrong Mac button");

        let windows = FactoryProducer::factory_for(Platform::Windows);
        assert_eq!(windows.platform(), Platform::Windows, "wrong family");
        assert_eq!(windows.create_button().paint(), "Rendering Windows Button", "wrong Windows button");
    }

    #[cfg_attr(not(doc),test)]
    fn os_names_select_families() {
        assert_eq!(FactoryProducer::factory_for_os_name("Mac OS X").platform(), Platform::Mac,     "'Mac OS X' is a Mac");
        assert_eq!(FactoryProducer::factory_for_os_name("macos").platform(),    Platform::Mac,     "'macos' is a Mac");
        assert_eq!(FactoryProducer::factory_for_os_name("Windows 11").platform(), Platform::Windows, "'Windows 11' is Windows");
        assert_eq!(FactoryProducer::factory_for_os_name("linux").platform(),    Platform::Windows, "unknown OSes fall back to Windows");
    }

    #[cfg_attr(not(doc),test)]
    fn checkboxes_toggle_back_and_forth() {
        let checkbox = FactoryProducer::factory_for(Platform::Mac).create_checkbox();
        assert!(checkbox.state() == CheckState::Unchecked, "checkboxes start unchecked");
        assert!(checkbox.toggle() == CheckState::Checked,   "first toggle should check");
        assert!(checkbox.toggle() == CheckState::Unchecked, "second toggle should uncheck");
        assert!(checkbox.state() == CheckState::Unchecked, "state should reflect the last toggle");
    }

    #[cfg_attr(not(doc),test)]
    fn concurrent_toggles_are_not_lost() {
        const THREADS: usize = 8;
        const TOGGLES_PER_THREAD: usize = 1001;
        let checkbox = WinCheckbox::default();
        crossbeam::scope(|scope| {
            for _ in 0..THREADS {
                scope.spawn(|_| for _ in 0..TOGGLES_PER_THREAD { checkbox.toggle(); });
            }
        }).expect("scope failed");
        // 8 * 1001 is even: every flip was undone by another one
        assert!(checkbox.state() == CheckState::Unchecked, "a toggle was lost");
    }

    #[cfg_attr(not(doc),test)]
    fn platforms_parse_case_insensitively() {
        assert_eq!("mac".parse::<Platform>().expect("'mac' should parse"), Platform::Mac);
        assert_eq!("WINDOWS".parse::<Platform>().expect("'WINDOWS' should parse"), Platform::Windows);
    }

}
