//! Helper macro for declaring port error enums.
//!
//! Each variant gets a `thiserror` message and a snake-case constructor that
//! accepts anything convertible into the field types, so adapters can write
//! `DrawingRepositoryError::connection(err.to_string())`.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum ProbePortError {
            Unreachable { message: String } => "store unreachable: {message}",
            Stale { attempts: u32 } => "stale after {attempts} attempts",
            Closed => "store closed",
        }
    }

    #[test]
    fn string_fields_accept_str() {
        let err = ProbePortError::unreachable("refused");
        assert_eq!(err.to_string(), "store unreachable: refused");
    }

    #[test]
    fn typed_fields_are_preserved() {
        let err = ProbePortError::stale(3_u32);
        assert_eq!(err, ProbePortError::Stale { attempts: 3 });
    }

    #[test]
    fn unit_variants_get_constructors() {
        assert_eq!(ProbePortError::closed().to_string(), "store closed");
    }
}
