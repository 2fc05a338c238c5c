//! Raw caller input for creating and updating an Escola.
//!
//! Values are unvalidated strings in wire form (the icon is base64). Create
//! input treats a missing key and `null` alike. Update input keeps them
//! apart: each [`EscolaPatch`] field is `None` when the key is absent and
//! `Some(None)` when it is an explicit `null`.

use serde::{Deserialize, Deserializer};

/// Input for creating an Escola. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EscolaInput {
    #[serde(rename = "EscolaGUID", default)]
    pub guid: Option<String>,
    #[serde(rename = "EscolaNome", default)]
    pub nome: Option<String>,
    #[serde(rename = "EscolaCorPriEs", default)]
    pub cor_pri_es: Option<String>,
    #[serde(rename = "EscolaCorPriCl", default)]
    pub cor_pri_cl: Option<String>,
    #[serde(rename = "EscolaCorSecEs", default)]
    pub cor_sec_es: Option<String>,
    #[serde(rename = "EscolaCorSecCl", default)]
    pub cor_sec_cl: Option<String>,
    /// Base64-encoded icon bytes.
    #[serde(rename = "EscolaIcone", default)]
    pub icone: Option<String>,
}

/// Partial update of an Escola, merged by key presence.
///
/// The identifier is not part of a patch; it is immutable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EscolaPatch {
    #[serde(rename = "EscolaNome", default, deserialize_with = "present")]
    pub nome: Option<Option<String>>,
    #[serde(rename = "EscolaCorPriEs", default, deserialize_with = "present")]
    pub cor_pri_es: Option<Option<String>>,
    #[serde(rename = "EscolaCorPriCl", default, deserialize_with = "present")]
    pub cor_pri_cl: Option<Option<String>>,
    #[serde(rename = "EscolaCorSecEs", default, deserialize_with = "present")]
    pub cor_sec_es: Option<Option<String>>,
    #[serde(rename = "EscolaCorSecCl", default, deserialize_with = "present")]
    pub cor_sec_cl: Option<Option<String>>,
    /// Base64-encoded icon bytes; `Some(Some(""))` clears like `Some(None)`.
    #[serde(rename = "EscolaIcone", default, deserialize_with = "present")]
    pub icone: Option<Option<String>>,
}

/// Map a present key to `Some(value)`, so an explicit `null` becomes
/// `Some(None)` instead of collapsing into the absent-key default.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
