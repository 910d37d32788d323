use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Jurisdiction {
    Nsw,
    Vic,
    Qld,
    Wa,
    Sa,
    Tas,
    Act,
    Nt,
}

impl Jurisdiction {
    pub const ALL: [Jurisdiction; 8] = [
        Jurisdiction::Nsw,
        Jurisdiction::Vic,
        Jurisdiction::Qld,
        Jurisdiction::Wa,
        Jurisdiction::Sa,
        Jurisdiction::Tas,
        Jurisdiction::Act,
        Jurisdiction::Nt,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Jurisdiction::Nsw => "NSW",
            Jurisdiction::Vic => "VIC",
            Jurisdiction::Qld => "QLD",
            Jurisdiction::Wa => "WA",
            Jurisdiction::Sa => "SA",
            Jurisdiction::Tas => "TAS",
            Jurisdiction::Act => "ACT",
            Jurisdiction::Nt => "NT",
        }
    }

    /// Static first-home benefits used when no fresher table is available.
    pub fn default_benefits(self) -> Benefits {
        let (grant, stamp_duty_concession) = match self {
            Jurisdiction::Nsw => (0.0, 37_800.0),
            Jurisdiction::Vic => (10_000.0, 31_070.0),
            Jurisdiction::Qld => (30_000.0, 8_750.0),
            Jurisdiction::Wa => (10_000.0, 19_940.0),
            Jurisdiction::Sa => (15_000.0, 21_330.0),
            Jurisdiction::Tas => (30_000.0, 20_240.0),
            Jurisdiction::Act => (0.0, 25_400.0),
            Jurisdiction::Nt => (10_000.0, 23_928.0),
        };
        Benefits {
            grant,
            stamp_duty_concession,
        }
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown jurisdiction code '{0}'")]
pub struct ParseJurisdictionError(pub String);

impl FromStr for Jurisdiction {
    type Err = ParseJurisdictionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Jurisdiction::ALL
            .into_iter()
            .find(|j| j.code() == upper)
            .ok_or_else(|| ParseJurisdictionError(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Benefits {
    pub grant: f64,
    pub stamp_duty_concession: f64,
}

pub type BenefitsTable = BTreeMap<Jurisdiction, Benefits>;

pub fn default_benefits_table() -> BenefitsTable {
    Jurisdiction::ALL
        .into_iter()
        .map(|j| (j, j.default_benefits()))
        .collect()
}

/// Resolves the grant and concession for a buyer. Non first-home buyers get
/// nothing; otherwise the live table wins and the static table fills gaps.
pub fn benefits_for(
    jurisdiction: Jurisdiction,
    is_first_home: bool,
    live: Option<&BenefitsTable>,
) -> Benefits {
    if !is_first_home {
        return Benefits::default();
    }
    live.and_then(|table| table.get(&jurisdiction).copied())
        .unwrap_or_else(|| jurisdiction.default_benefits())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_case_insensitively() {
        assert_eq!("wa".parse::<Jurisdiction>(), Ok(Jurisdiction::Wa));
        assert_eq!(" NSW ".parse::<Jurisdiction>(), Ok(Jurisdiction::Nsw));
        let err = "XYZ".parse::<Jurisdiction>().expect_err("unknown code");
        assert!(err.to_string().contains("XYZ"));
    }

    #[test]
    fn default_table_covers_every_jurisdiction() {
        let table = default_benefits_table();
        assert_eq!(table.len(), Jurisdiction::ALL.len());
        assert_eq!(table[&Jurisdiction::Qld].grant, 30_000.0);
        assert_eq!(table[&Jurisdiction::Nsw].stamp_duty_concession, 37_800.0);
    }

    #[test]
    fn benefits_for_non_first_home_is_zero() {
        let b = benefits_for(Jurisdiction::Vic, false, None);
        assert_eq!(b, Benefits::default());
    }

    #[test]
    fn benefits_for_prefers_live_table_and_falls_back_per_entry() {
        let mut live = BenefitsTable::new();
        live.insert(
            Jurisdiction::Wa,
            Benefits {
                grant: 1.0,
                stamp_duty_concession: 2.0,
            },
        );
        assert_eq!(benefits_for(Jurisdiction::Wa, true, Some(&live)).grant, 1.0);
        assert_eq!(
            benefits_for(Jurisdiction::Sa, true, Some(&live)),
            Jurisdiction::Sa.default_benefits()
        );
    }

    #[test]
    fn serializes_as_upper_case_code_including_map_keys() {
        let json = serde_json::to_string(&default_benefits_table()).expect("serialize");
        assert!(json.contains("\"ACT\""));
        assert!(json.contains("\"stampDutyConcession\""));
        let back: BenefitsTable = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.len(), 8);
    }
}
