//! Step-by-step construction of [Laptop]s -- an object with many optional fields that would otherwise require
//! an unreadable, many-parameters constructor.

use std::fmt::{Display, Formatter};
use serde::{Serialize, Deserialize};


/// The operating system assumed when none is given to the [LaptopBuilder]
pub const DEFAULT_OS: &str = "Windows";


/// An immutable laptop configuration -- see [Laptop::builder()]
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct Laptop {
    cpu:         Option<String>,
    #[serde(default)]
    ram:         u32,
    #[serde(default)]
    storage:     u32,
    gpu:         Option<String>,
    #[serde(default = "default_os")]
    os:          String,
    screen_type: Option<String>,
}

fn default_os() -> String {
    String::from(DEFAULT_OS)
}

impl Laptop {

    pub fn builder() -> LaptopBuilder {
        LaptopBuilder::default()
    }

    pub fn cpu(&self) -> Option<&str> {
        self.cpu.as_deref()
    }

    /// in GB
    pub fn ram(&self) -> u32 {
        self.ram
    }

    /// in GB
    pub fn storage(&self) -> u32 {
        self.storage
    }

    pub fn gpu(&self) -> Option<&str> {
        self.gpu.as_deref()
    }

    pub fn os(&self) -> &str {
        &self.os
    }

    pub fn screen_type(&self) -> Option<&str> {
        self.screen_type.as_deref()
    }
}

impl Display for Laptop {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        fn quoted(value: Option<&str>) -> String {
            value.map_or_else(|| String::from("null"), |value| format!("'{}'", value))
        }
        write!(f, "Laptop{{cpu={}, ram={}, storage={}, gpu={}, os='{}', screenType={}}}",
               quoted(self.cpu()), self.ram, self.storage, quoted(self.gpu()), self.os, quoted(self.screen_type()))
    }
}


/// Collects [Laptop] parts one at a time -- every setter consumes & returns the builder, so calls may be chained
#[derive(Debug,Clone)]
pub struct LaptopBuilder {
    cpu:         Option<String>,
    ram:         u32,
    storage:     u32,
    gpu:         Option<String>,
    os:          String,
    screen_type: Option<String>,
}

impl Default for LaptopBuilder {
    fn default() -> Self {
        Self {
            cpu:         None,
            ram:         0,
            storage:     0,
            gpu:         None,
            os:          default_os(),
            screen_type: None,
        }
    }
}

impl LaptopBuilder {

    pub fn cpu<IntoString: Into<String>>(mut self, cpu: IntoString) -> Self {
        self.cpu = Some(cpu.into());
        self
    }

    pub fn ram(mut self, ram: u32) -> Self {
        self.ram = ram;
        self
    }

    pub fn storage(mut self, storage: u32) -> Self {
        self.storage = storage;
        self
    }

    pub fn gpu<IntoString: Into<String>>(mut self, gpu: IntoString) -> Self {
        self.gpu = Some(gpu.into());
        self
    }

    pub fn os<IntoString: Into<String>>(mut self, os: IntoString) -> Self {
        self.os = os.into();
        self
    }

    pub fn screen_type<IntoString: Into<String>>(mut self, screen_type: IntoString) -> Self {
        self.screen_type = Some(screen_type.into());
        self
    }

    pub fn build(self) -> Laptop {
        Laptop {
            cpu:         self.cpu,
            ram:         self.ram,
            storage:     self.storage,
            gpu:         self.gpu,
            os:          self.os,
            screen_type: self.screen_type,
        }
    }
}


/// Unit tests the [builder](self) module
#[cfg(any(test,doc))]
mod tests {
    use super::*;

    #[cfg_attr(not(doc),test)]
    fn fully_specified_laptops() {
        let gaming_laptop = Laptop::builder()
            .cpu("Intel i9")
            .ram(32)
            .storage(1000)
            .gpu("RTX 4080")
            .os("Windows 11")
            .screen_type("OLED")
            .build();
        assert_eq!(gaming_laptop.gpu(), Some("RTX 4080"), "wrong gpu");
        assert_eq!(gaming_laptop.to_string(),
                   "Laptop{cpu='Intel i9', ram=32, storage=1000, gpu='RTX 4080', os='Windows 11', screenType='OLED'}",
                   "wrong rendering");
    }

    #[cfg_attr(not(doc),test)]
    fn partially_specified_laptops_get_defaults() {
        let office_laptop = Laptop::builder()
            .cpu("Intel i5")
            .ram(8)
            .storage(256)
            .build();
        assert_eq!(office_laptop.os(), DEFAULT_OS, "the default OS wasn't applied");
        assert_eq!(office_laptop.gpu(), None, "no gpu was given");
        assert_eq!(office_laptop.to_string(),
                   "Laptop{cpu='Intel i5', ram=8, storage=256, gpu=null, os='Windows', screenType=null}",
                   "wrong rendering");
    }

    #[cfg_attr(not(doc),test)]
    fn laptops_are_ron_serializable() {
        let laptop = Laptop::builder().cpu("M3").ram(16).storage(512).os("macOS").build();
        let serialized = ron::to_string(&laptop).expect("RON serialization failed");
        let deserialized: Laptop = ron::from_str(&serialized).expect("RON deserialization failed");
        assert_eq!(deserialized, laptop, "RON serde is not good");
    }

}
