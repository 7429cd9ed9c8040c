/// Borrow the inner value of an enum variant, if the variant matches.
pub trait TryAsRef<T> {
    fn try_as_ref(&self) -> Option<&T>;
}

/// Mutably borrow the inner value of an enum variant, if the variant matches.
pub trait TryAsMut<T> {
    fn try_as_mut(&mut self) -> Option<&mut T>;
}

/// Implements [`TryAsRef`] and [`TryAsMut`] for every listed variant of an
/// enum whose variants each wrap a single distinct type.
#[macro_export]
macro_rules! impl_try_as {
    ($enum_type:ident, $($variant:ident($variant_type:ty)),* $(,)?) => {
        $(
            impl $crate::convert::TryAsRef<$variant_type> for $enum_type {
                fn try_as_ref(&self) -> Option<&$variant_type> {
                    match self {
                        $enum_type::$variant(val) => Some(val),
                        _ => None,
                    }
                }
            }

            impl $crate::convert::TryAsMut<$variant_type> for $enum_type {
                fn try_as_mut(&mut self) -> Option<&mut $variant_type> {
                    match self {
                        $enum_type::$variant(val) => Some(val),
                        _ => None,
                    }
                }
            }
        )*
    };
}
