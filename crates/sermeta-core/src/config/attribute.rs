use crate::config::ConfigError;
use serde::Deserialize;

///
/// AttributeOptions
/// Structured declaration form: any subset of `type`, `name`, `groups`.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AttributeOptions {
    #[serde(default, rename = "type")]
    pub type_hint: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub groups: Vec<String>,
}

///
/// AttributeDecl
///
/// One recognized attribute declaration shape. Anything else fails closed
/// rather than being coerced.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AttributeDecl {
    /// Bare listing: just the field name.
    Bare(String),

    /// Shorthand pair: field name plus a forced serialization type.
    Typed { field: String, type_hint: String },

    /// Structured form with explicit options.
    Detailed {
        field: String,
        options: AttributeOptions,
    },
}

impl AttributeDecl {
    /// Parse one raw declaration entry for `class`.
    pub fn from_value(class: &str, value: &toml::Value) -> Result<Self, ConfigError> {
        match value {
            toml::Value::String(field) => Ok(Self::Bare(field.clone())),

            toml::Value::Table(table) => {
                let mut entries = table.iter();
                let Some((field, decl)) = entries.next() else {
                    return Err(unrecognized(class, "", "declaration table is empty"));
                };
                if entries.next().is_some() {
                    return Err(unrecognized(
                        class,
                        field,
                        "declaration table must contain exactly one field",
                    ));
                }

                match decl {
                    toml::Value::String(type_hint) => Ok(Self::Typed {
                        field: field.clone(),
                        type_hint: type_hint.clone(),
                    }),
                    toml::Value::Table(_) => {
                        let options: AttributeOptions = decl
                            .clone()
                            .try_into()
                            .map_err(|err: toml::de::Error| {
                                unrecognized(class, field, err.to_string())
                            })?;

                        Ok(Self::Detailed {
                            field: field.clone(),
                            options,
                        })
                    }
                    _ => Err(unrecognized(
                        class,
                        field,
                        "field declaration must be a type string or an options table",
                    )),
                }
            }

            _ => Err(unrecognized(
                class,
                &value.to_string(),
                "declaration must be a field name or a single-field table",
            )),
        }
    }

    /// The source-side field name this declaration maps.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::Bare(field)
            | Self::Typed { field, .. }
            | Self::Detailed { field, .. } => field,
        }
    }
}

fn unrecognized(class: &str, key: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::UnrecognizedAttribute {
        class: class.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}
