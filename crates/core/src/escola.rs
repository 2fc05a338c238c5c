//! Escola entity and its wire projection.
//!
//! An [`Escola`] can only be built through validating constructors and
//! setters, so any value that exists satisfies the field rules:
//!
//! - `EscolaGUID`: exactly 36 characters after trimming.
//! - `EscolaNome`: absent, or 3..=100 characters after trimming.
//! - colors: absent, or exactly six hex digits after trimming.
//! - `EscolaIcone`: absent, or arbitrary bytes (base64 on the wire).

use std::fmt;
use std::sync::LazyLock;

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use regex::Regex;
use serde::Serialize;

use crate::error::CoreError;
use crate::field::EscolaField;
use crate::input::EscolaInput;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Required length of an identifier, in characters.
pub const GUID_LENGTH: usize = 36;

/// Minimum length of a (trimmed) name.
pub const NOME_MIN_LENGTH: usize = 3;

/// Maximum length of a (trimmed) name.
pub const NOME_MAX_LENGTH: usize = 100;

static HEX_COLOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Fa-f]{6}$").expect("valid regex"));

/// Standard alphabet; padding is optional on input and always written on output.
const ICONE_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

// ---------------------------------------------------------------------------
// Identifier
// ---------------------------------------------------------------------------

/// A validated 36-character Escola identifier.
///
/// The format is UUID-shaped in practice but only the length is enforced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EscolaGuid(String);

impl EscolaGuid {
    /// Trim and validate a caller-supplied identifier.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        let guid = value.trim();
        if guid.is_empty() {
            return Err(CoreError::Validation(
                "EscolaGUID must be a non-empty string".to_string(),
            ));
        }
        if guid.chars().count() != GUID_LENGTH {
            return Err(CoreError::Validation(format!(
                "EscolaGUID must be exactly {GUID_LENGTH} characters"
            )));
        }
        Ok(Self(guid.to_string()))
    }

    /// A fresh random (v4) identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EscolaGuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}


// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// Unvalidated values for every mutable Escola field.
///
/// Used to build an [`Escola`] in one step and to carry the stored values of
/// an existing record into a merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EscolaAttributes {
    pub nome: Option<String>,
    pub cor_pri_es: Option<String>,
    pub cor_pri_cl: Option<String>,
    pub cor_sec_es: Option<String>,
    pub cor_sec_cl: Option<String>,
    pub icone: Option<Vec<u8>>,
}

/// One school record. Fields are private; setters validate before storing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Escola {
    guid: EscolaGuid,
    nome: Option<String>,
    cor_pri_es: Option<String>,
    cor_pri_cl: Option<String>,
    cor_sec_es: Option<String>,
    cor_sec_cl: Option<String>,
    icone: Option<Vec<u8>>,
}

impl Escola {
    /// An Escola with the given identifier and every other field absent.
    pub fn new(guid: EscolaGuid) -> Self {
        Self {
            guid,
            nome: None,
            cor_pri_es: None,
            cor_pri_cl: None,
            cor_sec_es: None,
            cor_sec_cl: None,
            icone: None,
        }
    }

    /// Build an Escola, validating every attribute. Fails on the first
    /// invalid field.
    pub fn build(guid: EscolaGuid, attributes: EscolaAttributes) -> Result<Self, CoreError> {
        let mut escola = Self::new(guid);
        escola.set_nome(attributes.nome.as_deref())?;
        escola.set_cor_pri_es(attributes.cor_pri_es.as_deref())?;
        escola.set_cor_pri_cl(attributes.cor_pri_cl.as_deref())?;
        escola.set_cor_sec_es(attributes.cor_sec_es.as_deref())?;
        escola.set_cor_sec_cl(attributes.cor_sec_cl.as_deref())?;
        escola.set_icone(attributes.icone);
        Ok(escola)
    }

    /// Validate a whole create input. A missing or empty identifier is
    /// replaced by a generated one; the icon is decoded from base64.
    pub fn from_input(input: EscolaInput) -> Result<Self, CoreError> {
        let guid = match input.guid.as_deref() {
            Some(raw) if !raw.is_empty() => EscolaGuid::parse(raw)?,
            _ => EscolaGuid::generate(),
        };
        let icone = decode_icone(input.icone.as_deref())?;
        Self::build(
            guid,
            EscolaAttributes {
                nome: input.nome,
                cor_pri_es: input.cor_pri_es,
                cor_pri_cl: input.cor_pri_cl,
                cor_sec_es: input.cor_sec_es,
                cor_sec_cl: input.cor_sec_cl,
                icone,
            },
        )
    }

    pub fn guid(&self) -> &EscolaGuid {
        &self.guid
    }

    pub fn nome(&self) -> Option<&str> {
        self.nome.as_deref()
    }

    pub fn cor_pri_es(&self) -> Option<&str> {
        self.cor_pri_es.as_deref()
    }

    pub fn cor_pri_cl(&self) -> Option<&str> {
        self.cor_pri_cl.as_deref()
    }

    pub fn cor_sec_es(&self) -> Option<&str> {
        self.cor_sec_es.as_deref()
    }

    pub fn cor_sec_cl(&self) -> Option<&str> {
        self.cor_sec_cl.as_deref()
    }

    pub fn icone(&self) -> Option<&[u8]> {
        self.icone.as_deref()
    }

    /// Stored value of a queryable field.
    pub fn field(&self, field: EscolaField) -> Option<&str> {
        match field {
            EscolaField::Guid => Some(self.guid.as_str()),
            EscolaField::Nome => self.nome(),
            EscolaField::CorPriEs => self.cor_pri_es(),
            EscolaField::CorPriCl => self.cor_pri_cl(),
            EscolaField::CorSecEs => self.cor_sec_es(),
            EscolaField::CorSecCl => self.cor_sec_cl(),
        }
    }

    /// Set the name. `None` and `""` clear it; otherwise the trimmed value
    /// must be 3..=100 characters.
    pub fn set_nome(&mut self, value: Option<&str>) -> Result<(), CoreError> {
        self.nome = match value {
            None | Some("") => None,
            Some(raw) => Some(validate_nome(raw)?),
        };
        Ok(())
    }

    pub fn set_cor_pri_es(&mut self, value: Option<&str>) -> Result<(), CoreError> {
        self.cor_pri_es = validate_hex(value, EscolaField::CorPriEs)?;
        Ok(())
    }

    pub fn set_cor_pri_cl(&mut self, value: Option<&str>) -> Result<(), CoreError> {
        self.cor_pri_cl = validate_hex(value, EscolaField::CorPriCl)?;
        Ok(())
    }

    pub fn set_cor_sec_es(&mut self, value: Option<&str>) -> Result<(), CoreError> {
        self.cor_sec_es = validate_hex(value, EscolaField::CorSecEs)?;
        Ok(())
    }

    pub fn set_cor_sec_cl(&mut self, value: Option<&str>) -> Result<(), CoreError> {
        self.cor_sec_cl = validate_hex(value, EscolaField::CorSecCl)?;
        Ok(())
    }

    pub fn set_icone(&mut self, value: Option<Vec<u8>>) {
        self.icone = value;
    }

    /// Copy out the stored values of every mutable field.
    pub fn to_attributes(&self) -> EscolaAttributes {
        EscolaAttributes {
            nome: self.nome.clone(),
            cor_pri_es: self.cor_pri_es.clone(),
            cor_pri_cl: self.cor_pri_cl.clone(),
            cor_sec_es: self.cor_sec_es.clone(),
            cor_sec_cl: self.cor_sec_cl.clone(),
            icone: self.icone.clone(),
        }
    }
}

fn validate_nome(raw: &str) -> Result<String, CoreError> {
    let nome = raw.trim();
    let len = nome.chars().count();
    if len < NOME_MIN_LENGTH {
        return Err(CoreError::Validation(format!(
            "EscolaNome must be at least {NOME_MIN_LENGTH} characters"
        )));
    }
    if len > NOME_MAX_LENGTH {
        return Err(CoreError::Validation(format!(
            "EscolaNome must be at most {NOME_MAX_LENGTH} characters"
        )));
    }
    Ok(nome.to_string())
}

fn validate_hex(value: Option<&str>, field: EscolaField) -> Result<Option<String>, CoreError> {
    match value {
        None | Some("") => Ok(None),
        Some(raw) => {
            let hex = raw.trim();
            if HEX_COLOR_RE.is_match(hex) {
                Ok(Some(hex.to_string()))
            } else {
                Err(CoreError::Validation(format!(
                    "{field} must be a 6-digit HEX color"
                )))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Icon encoding
// ---------------------------------------------------------------------------

/// Decode a base64 icon. `None` and `""` mean "no icon".
pub fn decode_icone(value: Option<&str>) -> Result<Option<Vec<u8>>, CoreError> {
    match value {
        None | Some("") => Ok(None),
        Some(raw) => ICONE_ENGINE
            .decode(raw.trim())
            .map(Some)
            .map_err(|e| CoreError::Validation(format!("EscolaIcone must be valid base64: {e}"))),
    }
}

pub fn encode_icone(bytes: &[u8]) -> String {
    ICONE_ENGINE.encode(bytes)
}

// ---------------------------------------------------------------------------
// DTO
// ---------------------------------------------------------------------------

/// Wire projection of an [`Escola`]; the icon is base64-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EscolaDto {
    #[serde(rename = "EscolaGUID")]
    pub guid: String,
    #[serde(rename = "EscolaNome")]
    pub nome: Option<String>,
    #[serde(rename = "EscolaCorPriEs")]
    pub cor_pri_es: Option<String>,
    #[serde(rename = "EscolaCorPriCl")]
    pub cor_pri_cl: Option<String>,
    #[serde(rename = "EscolaCorSecEs")]
    pub cor_sec_es: Option<String>,
    #[serde(rename = "EscolaCorSecCl")]
    pub cor_sec_cl: Option<String>,
    #[serde(rename = "EscolaIcone")]
    pub icone: Option<String>,
}

impl From<&Escola> for EscolaDto {
    fn from(escola: &Escola) -> Self {
        Self {
            guid: escola.guid.to_string(),
            nome: escola.nome.clone(),
            cor_pri_es: escola.cor_pri_es.clone(),
            cor_pri_cl: escola.cor_pri_cl.clone(),
            cor_sec_es: escola.cor_sec_es.clone(),
            cor_sec_cl: escola.cor_sec_cl.clone(),
            icone: escola.icone.as_deref().map(encode_icone),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
