//! Data transfer objects (DTO)
//!
//! Insert and partial-update payloads for every game-data record, with the
//! field constraints checked before anything reaches the database.
//! Update payloads use `None` for "leave unchanged".

use serde::{Deserialize, Serialize};

use crate::entity::choices::{Lang, Status, Threshold};
use crate::entity::profiles::DEFAULT_SIZE;
use crate::error::ValidationError;

// ==================== field rules ====================

/// Non-blank string of at most `max` characters
fn required(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::RequiredFieldMissing { field });
    }
    max_len(field, value, max)
}

/// Possibly blank string of at most `max` characters
fn max_len(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

/// Non-blank text without length limit
fn required_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::RequiredFieldMissing { field });
    }
    Ok(())
}

/// Comma-separated non-negative integers such as `"3,2,1"`
fn int_list(
    field: &'static str,
    value: &str,
    max: usize,
    allow_blank: bool,
) -> Result<(), ValidationError> {
    if value.is_empty() {
        if allow_blank {
            return Ok(());
        }
        return Err(ValidationError::RequiredFieldMissing { field });
    }
    max_len(field, value, max)?;
    let well_formed = value
        .split(',')
        .all(|item| !item.is_empty() && item.bytes().all(|b| b.is_ascii_digit()));
    if !well_formed {
        return Err(ValidationError::InvalidFormat {
            field,
            reason: "expected digits separated by commas".to_string(),
        });
    }
    Ok(())
}

fn check_some<T>(
    value: &Option<T>,
    rule: impl FnOnce(&T) -> Result<(), ValidationError>,
) -> Result<(), ValidationError> {
    match value {
        Some(v) => rule(v),
        None => Ok(()),
    }
}

fn default_size() -> i32 {
    DEFAULT_SIZE
}

// ==================== factions ====================

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewFaction {
    pub name: String,
    #[serde(default)]
    pub lang: Lang,
    #[serde(default)]
    pub status: Status,
}

impl NewFaction {
    pub fn validate(&self) -> Result<(), ValidationError> {
        required("name", &self.name, 50)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FactionUpdate {
    pub name: Option<String>,
    pub lang: Option<Lang>,
    pub status: Option<Status>,
}

impl FactionUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_some(&self.name, |v| required("name", v, 50))
    }
}

// ==================== abilities ====================

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewAbility {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub lang: Lang,
    #[serde(default)]
    pub status: Status,
}

impl NewAbility {
    pub fn validate(&self) -> Result<(), ValidationError> {
        required("name", &self.name, 50)?;
        required_text("description", &self.description)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AbilityUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub lang: Option<Lang>,
    pub status: Option<Status>,
}

impl AbilityUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_some(&self.name, |v| required("name", v, 50))?;
        check_some(&self.description, |v| required_text("description", v))
    }
}

// ==================== profiles ====================

/// Profile payload.
///
/// Editors group the fields as: identity (`name`, `title`), general
/// characteristics (`action_points`, `movement`, `life_points`, `size`,
/// `cost`), combat (`damage_cc`, `damage_ra`) and skills (`combat`,
/// `defense`, `mind`, `reflexes`).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewProfile {
    pub name: String,
    #[serde(default)]
    pub title: String,
    pub life_points: String,
    pub movement: String,
    pub damage_cc: String,
    #[serde(default)]
    pub damage_ra: String,
    pub action_points: i32,
    pub cost: i32,
    pub combat: i32,
    pub defense: i32,
    pub mind: i32,
    pub reflexes: i32,
    #[serde(default = "default_size")]
    pub size: i32,
    #[serde(default)]
    pub lang: Lang,
    #[serde(default)]
    pub status: Status,
}

impl NewProfile {
    pub fn validate(&self) -> Result<(), ValidationError> {
        required("name", &self.name, 30)?;
        max_len("title", &self.title, 50)?;
        int_list("life_points", &self.life_points, 8, false)?;
        int_list("movement", &self.movement, 8, false)?;
        int_list("damage_cc", &self.damage_cc, 16, false)?;
        int_list("damage_ra", &self.damage_ra, 16, true)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub title: Option<String>,
    pub life_points: Option<String>,
    pub movement: Option<String>,
    pub damage_cc: Option<String>,
    pub damage_ra: Option<String>,
    pub action_points: Option<i32>,
    pub cost: Option<i32>,
    pub combat: Option<i32>,
    pub defense: Option<i32>,
    pub mind: Option<i32>,
    pub reflexes: Option<i32>,
    pub size: Option<i32>,
    pub lang: Option<Lang>,
    pub status: Option<Status>,
}

impl ProfileUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_some(&self.name, |v| required("name", v, 30))?;
        check_some(&self.title, |v| max_len("title", v, 50))?;
        check_some(&self.life_points, |v| int_list("life_points", v, 8, false))?;
        check_some(&self.movement, |v| int_list("movement", v, 8, false))?;
        check_some(&self.damage_cc, |v| int_list("damage_cc", v, 16, false))?;
        check_some(&self.damage_ra, |v| int_list("damage_ra", v, 16, true))
    }
}

/// Value attached to a profile's ability, blank when the ability has none.
pub fn validate_ability_value(value: &str) -> Result<(), ValidationError> {
    max_len("value", value, 10)
}

// ==================== alchemists ====================

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewAlchemist {
    #[serde(flatten)]
    pub profile: NewProfile,
    pub element: String,
    pub rank: String,
    pub stones: i32,
}

impl NewAlchemist {
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.profile.validate()?;
        required("element", &self.element, 10)?;
        required("rank", &self.rank, 30)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AlchemistUpdate {
    #[serde(flatten)]
    pub profile: ProfileUpdate,
    pub element: Option<String>,
    pub rank: Option<String>,
    pub stones: Option<i32>,
}

impl AlchemistUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.profile.validate()?;
        check_some(&self.element, |v| required("element", v, 10))?;
        check_some(&self.rank, |v| required("rank", v, 30))
    }
}

// ==================== formulas ====================

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewFormula {
    pub name: String,
    pub effect: String,
    pub focus_level: i32,
    pub components: String,
    #[serde(default)]
    pub threshold: Threshold,
    pub range: i32,
    pub alchemist_id: i32,
    #[serde(default)]
    pub lang: Lang,
    #[serde(default)]
    pub status: Status,
}

impl NewFormula {
    pub fn validate(&self) -> Result<(), ValidationError> {
        required("name", &self.name, 50)?;
        required_text("effect", &self.effect)?;
        required("components", &self.components, 20)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormulaUpdate {
    pub name: Option<String>,
    pub effect: Option<String>,
    pub focus_level: Option<i32>,
    pub components: Option<String>,
    pub threshold: Option<Threshold>,
    pub range: Option<i32>,
    /// Moves the formula to another alchemist
    pub alchemist_id: Option<i32>,
    pub lang: Option<Lang>,
    pub status: Option<Status>,
}

impl FormulaUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_some(&self.name, |v| required("name", v, 50))?;
        check_some(&self.effect, |v| required_text("effect", v))?;
        check_some(&self.components, |v| required("components", v, 20))
    }
}

// ==================== enhancements ====================

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewEnhancement {
    pub description: String,
    #[serde(default)]
    pub lang: Lang,
    #[serde(default)]
    pub status: Status,
}

impl NewEnhancement {
    pub fn validate(&self) -> Result<(), ValidationError> {
        required_text("description", &self.description)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhancementUpdate {
    pub description: Option<String>,
    pub lang: Option<Lang>,
    pub status: Option<Status>,
}

impl EnhancementUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_some(&self.description, |v| required_text("description", v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> NewProfile {
        NewProfile {
            name: "Arkéo".to_string(),
            title: String::new(),
            life_points: "3,2,1".to_string(),
            movement: "4".to_string(),
            damage_cc: "2,3,4".to_string(),
            damage_ra: String::new(),
            action_points: 2,
            cost: 25,
            combat: 3,
            defense: 4,
            mind: 2,
            reflexes: 3,
            size: DEFAULT_SIZE,
            lang: Lang::default(),
            status: Status::default(),
        }
    }

    #[test]
    fn valid_profile_passes() {
        assert_eq!(profile().validate(), Ok(()));
    }

    #[test]
    fn blank_name_is_missing() {
        let mut p = profile();
        p.name = "   ".to_string();
        assert_eq!(
            p.validate(),
            Err(ValidationError::RequiredFieldMissing { field: "name" })
        );
    }

    #[test]
    fn name_longer_than_limit_is_rejected() {
        let mut p = profile();
        p.name = "x".repeat(31);
        assert_eq!(
            p.validate(),
            Err(ValidationError::TooLong {
                field: "name",
                max: 30
            })
        );
        p.name = "é".repeat(30);
        assert_eq!(p.validate(), Ok(()));
    }

    #[test]
    fn int_lists_must_be_digits_and_commas() {
        let mut p = profile();
        p.life_points = "3,,1".to_string();
        assert!(matches!(
            p.validate(),
            Err(ValidationError::InvalidFormat {
                field: "life_points",
                ..
            })
        ));

        p.life_points = "-1".to_string();
        assert!(p.validate().is_err());

        p.life_points = "3, 2".to_string();
        assert!(p.validate().is_err());
    }

    #[test]
    fn ranged_damage_may_be_blank_but_melee_may_not() {
        let mut p = profile();
        p.damage_ra = String::new();
        assert_eq!(p.validate(), Ok(()));

        p.damage_cc = String::new();
        assert_eq!(
            p.validate(),
            Err(ValidationError::RequiredFieldMissing { field: "damage_cc" })
        );
    }

    #[test]
    fn update_checks_only_provided_fields() {
        assert_eq!(ProfileUpdate::default().validate(), Ok(()));

        let update = ProfileUpdate {
            movement: Some("123456789".to_string()),
            ..Default::default()
        };
        assert_eq!(
            update.validate(),
            Err(ValidationError::TooLong {
                field: "movement",
                max: 8
            })
        );
    }

    #[test]
    fn alchemist_checks_profile_and_own_fields() {
        let alchemist = NewAlchemist {
            profile: profile(),
            element: "Feu".to_string(),
            rank: "Initié".to_string(),
            stones: 3,
        };
        assert_eq!(alchemist.validate(), Ok(()));

        let mut bad = alchemist.clone();
        bad.element = "Quintessence".to_string();
        assert_eq!(
            bad.validate(),
            Err(ValidationError::TooLong {
                field: "element",
                max: 10
            })
        );
    }

    #[test]
    fn payload_defaults_apply_when_fields_are_omitted() {
        let faction: NewFaction = serde_json::from_str(r#"{"name":"Avalon"}"#).unwrap();
        assert_eq!(faction.lang, Lang::French);
        assert_eq!(faction.status, Status::Draft);

        let formula: NewFormula = serde_json::from_str(
            r#"{"name":"Boule de feu","effect":"1 dégât","focus_level":2,
                "components":"Feu","range":8,"alchemist_id":1}"#,
        )
        .unwrap();
        assert_eq!(formula.threshold, Threshold::Target);
    }

    #[test]
    fn payload_with_unknown_choice_is_rejected() {
        let lang = serde_json::from_str::<NewFaction>(r#"{"name":"Avalon","lang":"de"}"#);
        assert!(lang.is_err());

        let status = serde_json::from_str::<NewEnhancement>(
            r#"{"description":"+1 portée","status":"archived"}"#,
        );
        assert!(status.is_err());

        let threshold = serde_json::from_str::<FormulaUpdate>(r#"{"threshold":"Self"}"#);
        assert!(threshold.is_err());
    }

    #[test]
    fn alchemist_payload_is_flat() {
        let alchemist: NewAlchemist = serde_json::from_str(
            r#"{"name":"Zaïa","life_points":"3,2,1","movement":"4","damage_cc":"1,2,3",
                "action_points":2,"cost":30,"combat":3,"defense":3,"mind":4,"reflexes":3,
                "element":"Eau","rank":"Maître","stones":4}"#,
        )
        .unwrap();
        assert_eq!(alchemist.profile.name, "Zaïa");
        assert_eq!(alchemist.profile.size, DEFAULT_SIZE);
        assert_eq!(alchemist.stones, 4);
    }

    #[test]
    fn ability_value_is_short() {
        assert_eq!(validate_ability_value(""), Ok(()));
        assert!(validate_ability_value("12345678901").is_err());
    }
}
