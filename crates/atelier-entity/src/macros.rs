//! Helper macro for the lowercase text enums stored as PostgreSQL enum types.

/// Implements `as_str`, `ALL`, `Display` and `FromStr` for a unit-only enum.
///
/// ```ignore
/// text_enum!(OrderStatus, "order status" {
///     Pending => "pending",
///     Shipped => "shipped",
/// });
/// ```
macro_rules! text_enum {
    ($name:ident, $label:literal { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Return the value as its lowercase wire string.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = ::atelier_core::AppError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(::atelier_core::AppError::validation(format!(
                        concat!("Invalid ", $label, ": '{}'. Expected one of: {}"),
                        s,
                        [$($text),+].join(", ")
                    ))),
                }
            }
        }
    };
}
