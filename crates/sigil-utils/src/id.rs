//! Plain `u32` index ids for arena-backed tables.
//!
//! Ids are deliberately dumb: they carry no generation counter and are only
//! meaningful together with the table that handed them out.

/// Defines a copyable `u32` id newtype with serde support.
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
        )]
        pub struct $name(u32);

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl $name {
            pub fn from_usize(index: usize) -> Self {
                Self(index as u32)
            }

            pub fn as_usize(&self) -> usize {
                self.0 as usize
            }

            pub fn as_u32(&self) -> u32 {
                self.0
            }
        }
    };
}
