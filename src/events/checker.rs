//! Event wiring checks.
//!
//! Verifies that every event channel an object declares has at least one
//! subscriber before a test exercises the object. An object declaring no
//! channels passes.

use crate::events::channel::Subscribers;

/// An object exposing its event channels for inspection.
pub trait Observable {
    /// Names of every channel the type declares, including type-level
    /// (`static`) channels.
    fn declared_events(&self) -> &'static [&'static str];

    /// Backing subscriber storage for `name`, matched case-insensitively.
    /// `None` when no storage can be located.
    fn event_storage(&self, name: &str) -> Option<&dyn Subscribers>;
}

/// True when every declared channel of `instance` has a subscriber.
pub fn check_events<T: Observable + ?Sized>(instance: &T) -> bool {
    first_unwired(instance).is_none()
}

/// The first declared channel that is missing storage or subscribers.
pub fn first_unwired<T: Observable + ?Sized>(instance: &T) -> Option<&'static str> {
    instance
        .declared_events()
        .iter()
        .copied()
        .find(|name| match instance.event_storage(name) {
            Some(storage) => !storage.has_subscribers(),
            None => {
                tracing::debug!(event = *name, "No subscriber storage for declared event");
                true
            }
        })
}

/// Implement [`Observable`] for a struct from its `EventChannel` fields.
///
/// Type-level channels held in statics follow `; static`.
///
/// ```
/// use netgame_diagnostics::events::{check_events, EventChannel};
/// use netgame_diagnostics::observable;
///
/// static RESETS: EventChannel<()> = EventChannel::new();
///
/// #[derive(Default)]
/// struct Lobby {
///     player_joined: EventChannel<u32>,
/// }
///
/// observable!(Lobby { player_joined; static RESETS });
///
/// let lobby = Lobby::default();
/// assert!(!check_events(&lobby));
/// lobby.player_joined.subscribe(|_| {});
/// RESETS.subscribe(|_| {});
/// assert!(check_events(&lobby));
/// ```
#[macro_export]
macro_rules! observable {
    ($ty:ty { $($field:ident),* $(,)? $(; static $($stat:ident),+ $(,)?)? }) => {
        impl $crate::events::Observable for $ty {
            fn declared_events(&self) -> &'static [&'static str] {
                &[$(::std::stringify!($field),)* $($(::std::stringify!($stat),)+)?]
            }

            fn event_storage(&self, name: &str) -> ::std::option::Option<&dyn $crate::events::Subscribers> {
                $(
                    if name.eq_ignore_ascii_case(::std::stringify!($field)) {
                        return ::std::option::Option::Some(&self.$field);
                    }
                )*
                $($(
                    if name.eq_ignore_ascii_case(::std::stringify!($stat)) {
                        return ::std::option::Option::Some(&$stat);
                    }
                )+)?
                let _ = name;
                ::std::option::Option::None
            }
        }
    };
}

/// Panic naming the first unwired channel of `instance`.
#[macro_export]
macro_rules! assert_events_wired {
    ($instance:expr) => {
        if let ::std::option::Option::Some(name) = $crate::events::first_unwired(&$instance) {
            ::std::panic!("event channel '{}' has no subscribers", name);
        }
    };
}
