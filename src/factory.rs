//! Notification channels chosen at runtime by name, through a factory function.\
//! Clients depend only on the [Notification] capability: which concrete type is built is entirely up to
//! [NotificationFactory] -- no type inspection ever happens on the client side.

use crate::types::PatternResult;
use std::str::FromStr;
use strum_macros::{Display, EnumString, VariantNames};
use log::info;


/// Kinds of [Notification]s the factory knows how to build -- parsed from (and displayed as) their upper case names
#[derive(Debug,Clone,Copy,PartialEq,Eq,Display,EnumString,VariantNames)]
pub enum NotificationKind {
    #[strum(serialize = "SMS")]
    Sms,
    #[strum(serialize = "EMAIL")]
    Email,
    #[strum(serialize = "PUSH")]
    Push,
}


/// Capability shared by every notification channel
pub trait Notification: Send + Sync {

    /// Delivers `message`, returning the line describing what was sent
    fn send(&self, message: &str) -> String;

    fn kind(&self) -> NotificationKind;
}

/// Defines a [Notification] whose delivery is simulated by logging `Sending <KIND>: <message>`
macro_rules! impl_notification {
    ($type_name: ident, $kind: expr) => {
        #[derive(Debug,Default)]
        pub struct $type_name;
        impl Notification for $type_name {
            fn send(&self, message: &str) -> String {
                let line = format!("Sending {}: {}", self.kind(), message);
                info!("{}", line);
                line
            }
            fn kind(&self) -> NotificationKind {
                $kind
            }
        }
    }
}

impl_notification!(EmailNotification, NotificationKind::Email);
impl_notification!(SmsNotification,   NotificationKind::Sms);
impl_notification!(PushNotification,  NotificationKind::Push);


/// see [self]
pub struct NotificationFactory;

impl NotificationFactory {

    /// Builds the [Notification] for the given strongly typed `kind`
    pub fn create(kind: NotificationKind) -> Box<dyn Notification> {
        match kind {
            NotificationKind::Sms   => Box::new(SmsNotification),
            NotificationKind::Email => Box::new(EmailNotification),
            NotificationKind::Push  => Box::new(PushNotification),
        }
    }

    /// Builds the [Notification] named by `notification_type` -- one of `"SMS"`, `"EMAIL"` or `"PUSH"`.\
    /// Returns `Ok(None)` if no type was given (an empty string) and `Err` if the type is unknown.
    pub fn create_notification(notification_type: &str) -> PatternResult<Option<Box<dyn Notification>>> {
        if notification_type.is_empty() {
            return Ok(None)
        }
        let kind = NotificationKind::from_str(notification_type)
            .map_err(|_| Box::<dyn std::error::Error + Send + Sync>::from(format!("Unknown notification type '{}' -- known types are {:?}",
                                                                                   notification_type, <NotificationKind as strum::VariantNames>::VARIANTS)))?;
        Ok(Some(Self::create(kind)))
    }
}


/// Unit tests the [factory](self) module
#[cfg(any(test,doc))]
mod tests {
    use super::*;

    #[cfg_attr(not(doc),test)]
    fn known_types_build_their_channels() {
        for (notification_type, expected_kind, expected_line) in [
            ("EMAIL", NotificationKind::Email, "Sending EMAIL: Hello Factory Pattern!"),
            ("SMS",   NotificationKind::Sms,   "Sending SMS: Hello Factory Pattern!"),
            ("PUSH",  NotificationKind::Push,  "Sending PUSH: Hello Factory Pattern!"),
        ] {
            let notification = NotificationFactory::create_notification(notification_type)
                .expect("known types should not fail")
                .expect("non-empty types should build something");
            assert_eq!(notification.kind(), expected_kind, "wrong channel built for '{notification_type}'");
            assert_eq!(notification.send("Hello Factory Pattern!"), expected_line, "wrong delivery for '{notification_type}'");
        }
    }

    #[cfg_attr(not(doc),test)]
    fn empty_types_build_nothing() {
        let notification = NotificationFactory::create_notification("").expect("an empty type is not an error");
        assert!(notification.is_none(), "nothing should have been built for an empty type");
    }

    #[cfg_attr(not(doc),test)]
    fn unknown_types_are_errors() {
        let err = NotificationFactory::create_notification("FAX").err().expect("'FAX' is not a known type");
        assert!(err.to_string().contains("Unknown notification type 'FAX'"), "unexpected error message: {err}");
        assert!(NotificationFactory::create_notification("sms").is_err(), "type names are case sensitive");
    }

}
