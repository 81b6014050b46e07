//! Resting place for [Instruments] used by the [observer](crate::observer) module


/// Honors the *Zero-Cost Instrumentation Pattern* for [Observable](crate::observer::Observable)s:\
/// Designed to be used as a const generic parameter for Structs,
/// causes the conditional instrumentation code in client structs to
/// be selectively compiled -- see the implemented *const methods* for
/// documentation of each available instrument.
///
/// Note: Using this enum directly in generics --
/// as in `struct S<const INSTUMENTS: Instruments = { Instruments::NoInstruments }> {...}`
/// -- is not possible yet: *"adt const params is experimental [E0658]"*,
/// so we'll use it as `struct S<const INSTRUMENTS: usize = 0>` instead, and use [Instruments::from(INSTRUMENTS)]
/// in the instrumentable implementations & `let s = S::<{Instruments::<YourOption>.into()}> {};` in clients.
#[derive(Debug,Clone,Copy,PartialEq)]
#[repr(usize)]
pub enum Instruments {
    /// No conditional instrumentation code will be included -- dispatches are a plain loop over the snapshot
    NoInstruments       = 0,

    LogsWithoutCounters = Self::LOG,
    LogsWithCounters    = Self::LOG | Self::COUNTERS,
    CountersWithoutLogs = Self::COUNTERS,
    /// Everything: logs, counters and a `TRACE` line for every single delivered notification
    Tracing             = Self::LOG | Self::COUNTERS | Self::TRACING,
    Custom(usize),
}

impl Instruments {

    /// metrics: counts accepted & ignored state changes, delivered & failed notifications
    const COUNTERS: usize = 1;
    /// outputs `DEBUG` on attach/detach & accepted state changes and `WARN` when an observer aborts a dispatch
    const LOG:      usize = 32;
    /// if [Instruments::LOG] is enabled, outputs every delivered notification in the *TRACE* level
    const TRACING:  usize = 128;

    /// To be used in if conditions, returns the enum variant
    /// that corresponds to the given const generic numeric value as described in [Self]
    pub const fn from(instruments: usize) -> Self {
        Self::Custom(instruments)
    }

    /// designed to be used by clients of the implementor structs, returns the number to be used as a
    /// const generic numeric value (when instantiating the implementor struct) that corresponds
    /// to the given enum variant
    pub const fn into(self) -> usize {
        match self {
            Self::NoInstruments        => 0,
            Self::LogsWithoutCounters  => Self::LOG,
            Self::LogsWithCounters     => Self::LOG | Self::COUNTERS,
            Self::CountersWithoutLogs  => Self::COUNTERS,
            Self::Tracing              => Self::LOG | Self::COUNTERS | Self::TRACING,
            Self::Custom(instruments)  => instruments,
        }
    }

    /// returns whether subjects should log registry changes & state changes
    pub const fn logging(self) -> bool {
        self.into() & (Self::LOG | Self::TRACING) > 0
    }

    /// returns whether subjects should log every delivery in the `TRACE` level
    pub const fn tracing(self) -> bool {
        self.into() & Self::TRACING > 0
    }

    /// returns whether subjects should keep their [DispatchMetrics](crate::observer::DispatchMetrics) up to date
    pub const fn counters(self) -> bool {
        self.into() & Self::COUNTERS > 0
    }

}


/// Unit tests the [instruments](self) module
#[cfg(any(test,doc))]
mod tests {
    use super::*;

    #[cfg_attr(not(doc),test)]
    fn presets_map_to_their_flags() {
        const NONE: usize = Instruments::NoInstruments.into();
        assert!(!Instruments::from(NONE).logging(),  "NoInstruments should not log");
        assert!(!Instruments::from(NONE).counters(), "NoInstruments should not count");
        assert!(!Instruments::from(NONE).tracing(),  "NoInstruments should not trace");

        let counters_only = Instruments::from(Instruments::CountersWithoutLogs.into());
        assert!(counters_only.counters() && !counters_only.logging(), "CountersWithoutLogs is wrong");

        let logs_only = Instruments::from(Instruments::LogsWithoutCounters.into());
        assert!(logs_only.logging() && !logs_only.counters() && !logs_only.tracing(), "LogsWithoutCounters is wrong");

        let everything = Instruments::from(Instruments::Tracing.into());
        assert!(everything.logging() && everything.counters() && everything.tracing(), "Tracing should enable all instruments");
    }

    #[cfg_attr(not(doc),test)]
    fn custom_values_round_trip_through_into() {
        assert_eq!(Instruments::Custom(33).into(), 33, "Custom instruments should be passed through verbatim");
        assert_eq!(Instruments::from(Instruments::LogsWithCounters.into()).into(), Instruments::LogsWithCounters.into());
    }

}
