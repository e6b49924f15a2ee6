use serde::{Deserialize, Serialize};

/// Chart colour used for any class key the catalogue does not know.
pub const FALLBACK_COLOR: &str = "#6b7280";

/// Common view over an instrument class, used when grouping holdings
/// into allocation slices.
pub trait InstrumentClass {
    /// Raw storage key (e.g., "acao", "tesouro_ipca").
    fn key(&self) -> &str;

    /// Display label for charts and tables.
    fn label(&self) -> &str;

    /// Hex chart colour.
    fn color(&self) -> &str;
}

/// Class of a variable-income (market-quoted) holding.
///
/// Unrecognised keys are kept verbatim in `Other` so they still take part
/// in grouping and totals.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VariableIncomeClass {
    /// Common/preferred shares ("acao")
    Stock,
    /// Real-estate investment fund ("fii")
    RealEstateFund,
    /// Exchange-traded fund ("etf")
    Etf,
    /// Foreign depositary receipt ("bdr")
    DepositaryReceipt,
    Other(String),
}

impl InstrumentClass for VariableIncomeClass {
    fn key(&self) -> &str {
        match self {
            Self::Stock => "acao",
            Self::RealEstateFund => "fii",
            Self::Etf => "etf",
            Self::DepositaryReceipt => "bdr",
            Self::Other(raw) => raw,
        }
    }

    fn label(&self) -> &str {
        match self {
            Self::Stock => "Ação",
            Self::RealEstateFund => "FII",
            Self::Etf => "ETF",
            Self::DepositaryReceipt => "BDR",
            Self::Other(raw) => raw,
        }
    }

    fn color(&self) -> &str {
        match self {
            Self::Stock => "#3b82f6",
            Self::RealEstateFund => "#10b981",
            Self::Etf => "#8b5cf6",
            Self::DepositaryReceipt => "#f59e0b",
            Self::Other(_) => FALLBACK_COLOR,
        }
    }
}

impl From<&str> for VariableIncomeClass {
    fn from(key: &str) -> Self {
        match key {
            "acao" => Self::Stock,
            "fii" => Self::RealEstateFund,
            "etf" => Self::Etf,
            "bdr" => Self::DepositaryReceipt,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for VariableIncomeClass {
    fn from(key: String) -> Self {
        Self::from(key.as_str())
    }
}

impl From<VariableIncomeClass> for String {
    fn from(class: VariableIncomeClass) -> Self {
        class.key().to_string()
    }
}

impl std::fmt::Display for VariableIncomeClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Class of a fixed-income holding. Same `Other` fallback as
/// [`VariableIncomeClass`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FixedIncomeClass {
    Cdb,
    Lci,
    Lca,
    TreasurySelic,
    TreasuryIpca,
    TreasuryFixedRate,
    Debenture,
    Cri,
    Cra,
    Savings,
    Other(String),
}

impl FixedIncomeClass {
    /// Every catalogued class, in display order.
    pub const ALL: [FixedIncomeClass; 10] = [
        Self::Cdb,
        Self::Lci,
        Self::Lca,
        Self::TreasurySelic,
        Self::TreasuryIpca,
        Self::TreasuryFixedRate,
        Self::Debenture,
        Self::Cri,
        Self::Cra,
        Self::Savings,
    ];
}

impl InstrumentClass for FixedIncomeClass {
    fn key(&self) -> &str {
        match self {
            Self::Cdb => "cdb",
            Self::Lci => "lci",
            Self::Lca => "lca",
            Self::TreasurySelic => "tesouro_selic",
            Self::TreasuryIpca => "tesouro_ipca",
            Self::TreasuryFixedRate => "tesouro_prefixado",
            Self::Debenture => "debenture",
            Self::Cri => "cri",
            Self::Cra => "cra",
            Self::Savings => "poupanca",
            Self::Other(raw) => raw,
        }
    }

    fn label(&self) -> &str {
        match self {
            Self::Cdb => "CDB",
            Self::Lci => "LCI",
            Self::Lca => "LCA",
            Self::TreasurySelic => "Tesouro Selic",
            Self::TreasuryIpca => "Tesouro IPCA+",
            Self::TreasuryFixedRate => "Tesouro Prefixado",
            Self::Debenture => "Debênture",
            Self::Cri => "CRI",
            Self::Cra => "CRA",
            Self::Savings => "Poupança",
            Self::Other(raw) => raw,
        }
    }

    fn color(&self) -> &str {
        match self {
            Self::Cdb => "#3b82f6",
            Self::Lci => "#10b981",
            Self::Lca => "#22c55e",
            Self::TreasurySelic => "#f59e0b",
            Self::TreasuryIpca => "#ef4444",
            Self::TreasuryFixedRate => "#8b5cf6",
            Self::Debenture => "#ec4899",
            Self::Cri => "#06b6d4",
            Self::Cra => "#14b8a6",
            Self::Savings => "#6b7280",
            Self::Other(_) => FALLBACK_COLOR,
        }
    }
}

impl From<&str> for FixedIncomeClass {
    fn from(key: &str) -> Self {
        match key {
            "cdb" => Self::Cdb,
            "lci" => Self::Lci,
            "lca" => Self::Lca,
            "tesouro_selic" => Self::TreasurySelic,
            "tesouro_ipca" => Self::TreasuryIpca,
            "tesouro_prefixado" => Self::TreasuryFixedRate,
            "debenture" => Self::Debenture,
            "cri" => Self::Cri,
            "cra" => Self::Cra,
            "poupanca" => Self::Savings,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for FixedIncomeClass {
    fn from(key: String) -> Self {
        Self::from(key.as_str())
    }
}

impl From<FixedIncomeClass> for String {
    fn from(class: FixedIncomeClass) -> Self {
        class.key().to_string()
    }
}

impl std::fmt::Display for FixedIncomeClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Benchmark a fixed-income rate is quoted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RateIndex {
    #[serde(rename = "cdi")]
    Cdi,
    #[serde(rename = "ipca")]
    Ipca,
    #[serde(rename = "selic")]
    Selic,
    #[serde(rename = "prefixado")]
    FixedRate,
    #[serde(rename = "poupanca")]
    Savings,
}

impl RateIndex {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cdi => "CDI",
            Self::Ipca => "IPCA+",
            Self::Selic => "Selic",
            Self::FixedRate => "Prefixado",
            Self::Savings => "Poupança",
        }
    }

    /// Unit suffix printed after the rate (e.g., "110% CDI" vs "6.5% a.a.").
    pub fn rate_suffix(&self) -> &'static str {
        match self {
            Self::Cdi | Self::Selic => "%",
            Self::Ipca | Self::FixedRate => "% a.a.",
            Self::Savings => "",
        }
    }
}

impl std::fmt::Display for RateIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// When a fixed-income position can be redeemed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Liquidity {
    #[serde(rename = "diaria")]
    Daily,
    #[serde(rename = "vencimento")]
    AtMaturity,
    #[serde(rename = "carencia")]
    GracePeriod,
}
