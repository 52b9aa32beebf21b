/// Configuration macros for zero-repetition config definitions
///
/// This module provides the `config_struct!` macro that allows defining
/// configuration structures with embedded defaults in a single declaration.

/// Define a configuration struct with embedded defaults
///
/// Generates the struct with public fields, a `Default` implementation using
/// the given values, serde support with `#[serde(default)]` so partial TOML
/// files fill in the rest, and a `from_toml_str` constructor.
///
/// # Example
/// ```
/// tizo_kiosk::config_struct! {
///     pub struct RefreshConfig {
///         interval_secs: u64 = 300,
///         enabled: bool = true,
///     }
/// }
///
/// let config = RefreshConfig::from_toml_str("enabled = false").unwrap();
/// assert_eq!(config.interval_secs, 300);
/// assert!(!config.enabled);
/// ```
#[macro_export]
macro_rules! config_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_name:ident: $field_type:ty = $default_value:expr
            ),*
            $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
        #[serde(default)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                pub $field_name: $field_type,
            )*
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $(
                        $field_name: $default_value,
                    )*
                }
            }
        }

        impl $name {
            /// Parse from TOML, filling missing fields with defaults
            pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
                toml::from_str(contents)
            }
        }
    };
}
