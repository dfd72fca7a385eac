//! Error enum generator shared by the catalog ports.

/// Declare a port error enum together with its constructors.
///
/// Every variant becomes a `thiserror` variant displaying `$message`, and
/// gains a snake-case constructor. Field constructors take `impl Into<T>` for
/// each field in declaration order:
///
/// ```ignore
/// define_port_error! {
///     pub enum ReadError {
///         Refused { message: String } => "refused: {message}",
///         Missing => "missing",
///     }
/// }
///
/// assert_eq!(ReadError::refused("no route").to_string(), "refused: no route");
/// assert_eq!(ReadError::missing(), ReadError::Missing);
/// ```
macro_rules! define_port_error {
    (
        $(#[$enum_attr:meta])*
        pub enum $name:ident {
            $(
                $(#[$attr:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),+ $(,)? } )? => $message:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_attr])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$attr])*
                #[error($message)]
                $variant $( { $($field: $ty),+ } )?,
            )+
        }

        impl $name {
            $( define_port_error!(@constructor $variant $( { $($field: $ty),+ } )?); )+
        }
    };

    (@constructor $variant:ident) => {
        ::paste::paste! {
            #[doc = "Build [`Self::" $variant "`]."]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@constructor $variant:ident { $($field:ident : $ty:ty),+ }) => {
        ::paste::paste! {
            #[doc = "Build [`Self::" $variant "`]."]
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),+) -> Self {
                Self::$variant { $($field: $field.into()),+ }
            }
        }
    };
}

pub(crate) use define_port_error;
