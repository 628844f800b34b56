//! Classification of free-text coverage ("modalidad") descriptions.

use serde::Serialize;

use crate::utils::fold_upper;

/// Canonical coverage classes recognized in scanned policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageClass {
    /// All-risk including total loss.
    AllRiskTotal,
    AllRisk,
    /// Total loss only (fire, theft, total destruction).
    TotalLoss,
    /// Third-party liability (responsabilidad civil).
    ThirdParty,
    Premium,
    Basic,
}

impl CoverageClass {
    /// Classifies coverage text. The first matching rule wins:
    ///
    /// 1. `TODO RIESGO` and `TOTAL`
    /// 2. `TODO RIESGO`
    /// 3. `TOTAL`, unless the text also says `BASICO`
    /// 4. `TERCEROS` or `RC`
    /// 5. `PREMIUM`
    /// 6. `BASICA` or `MINIMA`
    pub fn classify(text: &str) -> Option<Self> {
        let text = fold_upper(text);
        let has = |needle: &str| text.contains(needle);

        if has("TODO RIESGO") && has("TOTAL") {
            Some(Self::AllRiskTotal)
        } else if has("TODO RIESGO") {
            Some(Self::AllRisk)
        } else if has("TOTAL") && !has("BASICO") {
            Some(Self::TotalLoss)
        } else if has("TERCEROS") || has("RC") {
            Some(Self::ThirdParty)
        } else if has("PREMIUM") {
            Some(Self::Premium)
        } else if has("BASICA") || has("MINIMA") {
            Some(Self::Basic)
        } else {
            None
        }
    }

    /// Tariff-name fragments tried in order for this class.
    pub fn tariff_candidates(&self) -> &'static [&'static str] {
        match self {
            Self::AllRiskTotal => &["TODO RIESGO TOTAL", "TODO RIESGO", "FULL", "COMPLETA"],
            Self::AllRisk => &["TODO RIESGO", "FULL", "COMPLETA"],
            Self::TotalLoss => &["PERDIDA TOTAL", "TOTAL", "INCENDIO Y HURTO", "INCENDIO"],
            Self::ThirdParty => &["RESPONSABILIDAD CIVIL", "TERCEROS", "RC"],
            Self::Premium => &["PREMIUM", "PLUS", "TODO RIESGO"],
            Self::Basic => &["BASICA", "BASICO", "MINIMA", "RESPONSABILIDAD CIVIL"],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AllRiskTotal => "todo riesgo total",
            Self::AllRisk => "todo riesgo",
            Self::TotalLoss => "pérdida total",
            Self::ThirdParty => "responsabilidad civil",
            Self::Premium => "premium",
            Self::Basic => "básica",
        }
    }
}

impl std::fmt::Display for CoverageClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
