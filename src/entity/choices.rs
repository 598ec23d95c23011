//! Closed choice sets stored as short string codes.
//!
//! Every game-data table carries a `lang` and a `status` column; formulas
//! add a `threshold`. The codes match the CHECK constraints created by the
//! migrations, so a value outside the set can be neither parsed, nor
//! deserialized, nor written.

use std::str::FromStr;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Language of a record. The game is edited in French, hence the default.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(2))")]
pub enum Lang {
    #[default]
    #[sea_orm(string_value = "fr")]
    #[serde(rename = "fr")]
    French,
    #[sea_orm(string_value = "en")]
    #[serde(rename = "en")]
    English,
}

/// Publication state of a record.
///
/// `Removed` is a soft state: rows are kept, and listings leave them out
/// only when their `RecordFilter` asks for another status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(3))")]
pub enum Status {
    #[default]
    #[sea_orm(string_value = "dft")]
    #[serde(rename = "dft")]
    Draft,
    #[sea_orm(string_value = "pub")]
    #[serde(rename = "pub")]
    Published,
    #[sea_orm(string_value = "del")]
    #[serde(rename = "del")]
    Removed,
}

/// Who a formula's threshold is rolled against.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(5))")]
pub enum Threshold {
    #[default]
    #[sea_orm(string_value = "Cible")]
    #[serde(rename = "Cible")]
    Target,
    #[sea_orm(string_value = "Auto")]
    #[serde(rename = "Auto")]
    Auto,
}

impl Lang {
    /// Label shown to editors
    pub fn label(self) -> &'static str {
        match self {
            Lang::French => "Français",
            Lang::English => "Anglais",
        }
    }
}

impl Status {
    /// Label shown to editors
    pub fn label(self) -> &'static str {
        match self {
            Status::Draft => "Brouillon",
            Status::Published => "Publié",
            Status::Removed => "Supprimé",
        }
    }
}

impl Threshold {
    pub fn label(self) -> &'static str {
        match self {
            Threshold::Target => "Cible",
            Threshold::Auto => "Auto",
        }
    }
}

/// Parses a stored code, naming `field` in the error.
fn parse_code<T: ActiveEnum<Value = String>>(
    field: &'static str,
    code: &str,
) -> Result<T, ValidationError> {
    T::try_from_value(&code.to_string()).map_err(|_| ValidationError::InvalidChoice {
        field,
        value: code.to_string(),
    })
}

macro_rules! code_conversions {
    ($ty:ty, $field:literal) => {
        impl FromStr for $ty {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_code($field, s)
            }
        }
    };
}

code_conversions!(Lang, "lang");
code_conversions!(Status, "status");
code_conversions!(Threshold, "threshold");
