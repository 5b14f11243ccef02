//! Macros for ergonomic table construction.

/// Generate a dense id enum for states or events.
///
/// Variants are numbered from zero in declaration order, so they line up
/// with table indices. The enum converts into the id type named after the
/// colon (`StateId` or `EventId`).
///
/// # Example
///
/// ```
/// use evqfsm::core::{EventId, StateId};
/// use evqfsm::id_enum;
///
/// id_enum! {
///     pub enum Door: StateId {
///         Open,
///         Closed,
///     }
/// }
///
/// id_enum! {
///     pub enum DoorEvent: EventId {
///         Push,
///         Pull,
///     }
/// }
///
/// assert_eq!(StateId::from(Door::Closed), StateId(1));
/// assert_eq!(EventId::from(DoorEvent::Push), EventId(0));
/// assert_eq!(Door::Open.name(), "Open");
/// assert_eq!(DoorEvent::ALL.len(), 2);
/// ```
#[macro_export]
macro_rules! id_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $kind:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in id order.
            pub const ALL: &'static [$name] = &[$($name::$variant),*];

            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            pub const fn index(self) -> usize {
                self as usize
            }
        }

        impl ::core::convert::From<$name> for $crate::core::$kind {
            fn from(value: $name) -> Self {
                $crate::core::$kind::from_index(value as usize)
            }
        }
    };
}
