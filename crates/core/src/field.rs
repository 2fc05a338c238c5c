//! Closed set of Escola fields that may be used in single-column lookups.
//!
//! Column names are the only part of a query that cannot be bound as a
//! parameter, so lookups go through [`EscolaField`] and its fixed
//! [`EscolaField::column`] fragments instead of caller-supplied text.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// A queryable column of the `escola` table. The icon blob is not queryable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EscolaField {
    Guid,
    Nome,
    CorPriEs,
    CorPriCl,
    CorSecEs,
    CorSecCl,
}

impl EscolaField {
    /// Every queryable field, in table column order.
    pub const ALL: [EscolaField; 6] = [
        EscolaField::Guid,
        EscolaField::Nome,
        EscolaField::CorPriEs,
        EscolaField::CorPriCl,
        EscolaField::CorSecEs,
        EscolaField::CorSecCl,
    ];

    /// Column name in the `escola` table (also the wire name of the field).
    pub const fn column(self) -> &'static str {
        match self {
            EscolaField::Guid => "EscolaGUID",
            EscolaField::Nome => "EscolaNome",
            EscolaField::CorPriEs => "EscolaCorPriEs",
            EscolaField::CorPriCl => "EscolaCorPriCl",
            EscolaField::CorSecEs => "EscolaCorSecEs",
            EscolaField::CorSecCl => "EscolaCorSecCl",
        }
    }
}

impl fmt::Display for EscolaField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for EscolaField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EscolaField::ALL
            .into_iter()
            .find(|field| field.column() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid search field '{s}'. Must be one of: {:?}",
                    EscolaField::ALL.map(EscolaField::column)
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn every_column_name_parses_back() {
        for field in EscolaField::ALL {
            assert_eq!(field.column().parse::<EscolaField>().unwrap(), field);
        }
    }

    #[test]
    fn unknown_field_is_rejected() {
        assert_matches!("EscolaIcone".parse::<EscolaField>(), Err(CoreError::Validation(_)));
        assert_matches!("escolanome".parse::<EscolaField>(), Err(CoreError::Validation(_)));
        assert_matches!("".parse::<EscolaField>(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn injection_attempt_is_rejected() {
        let err = "EscolaNome = '' OR 1=1 --".parse::<EscolaField>().unwrap_err();
        assert!(err.to_string().contains("Invalid search field"));
    }
}
