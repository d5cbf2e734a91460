/// Default cache time-to-live in milliseconds (5 minutes)
pub const DEFAULT_CACHE_TTL_MS: u64 = 300_000;

/// Default timeout for a single provider call in milliseconds
pub const DEFAULT_PROVIDER_TIMEOUT_MS: u64 = 10_000;

/// Default lookback when a historical request gives no start date
pub const DEFAULT_HISTORY_DAYS: i64 = 30;

/// Default historical bar size
pub const DEFAULT_INTERVAL: &str = "1d";

/// Default period accepted by the historical endpoint
pub const DEFAULT_PERIOD: &str = "30d";

/// Summary modules requested for asset details
pub const DETAIL_MODULES: [&str; 5] = [
    "assetProfile",
    "summaryDetail",
    "financialData",
    "recommendationTrend",
    "earnings",
];

/// Market indices and benchmarks queried as one batch for the trends snapshot
pub const MARKET_INDICES: [&str; 6] = ["^BVSP", "^GSPC", "^IXIC", "^VIX", "CL=F", "GC=F"];

/// Primary oil-company ticker (Petrobras ADR)
pub const PETROBRAS_SYMBOL: &str = "PBR";

/// Primary mining-company ticker (Vale ADR)
pub const VALE_SYMBOL: &str = "VALE";

/// CBOE volatility index
pub const VIX_SYMBOL: &str = "^VIX";

/// Ibovespa index
pub const IBOVESPA_SYMBOL: &str = "^BVSP";

/// A curated cross-listed regional equity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionalListing {
    pub symbol: &'static str,
    pub name: &'static str,
    pub sector: &'static str,
}

/// Brazilian ADRs listed in New York, in batch request order
///
/// Sector groups are built from this list in first-seen order.
pub const BRAZILIAN_ADRS: [RegionalListing; 10] = [
    RegionalListing { symbol: "PBR", name: "Petrobras", sector: "Energy" },
    RegionalListing { symbol: "VALE", name: "Vale", sector: "Basic Materials" },
    RegionalListing { symbol: "ITUB", name: "Itaú Unibanco", sector: "Financial Services" },
    RegionalListing { symbol: "BBD", name: "Banco Bradesco", sector: "Financial Services" },
    RegionalListing { symbol: "ABEV", name: "Ambev", sector: "Consumer Defensive" },
    RegionalListing { symbol: "GGB", name: "Gerdau", sector: "Basic Materials" },
    RegionalListing { symbol: "SID", name: "Companhia Siderúrgica Nacional", sector: "Basic Materials" },
    RegionalListing { symbol: "CIG", name: "Cemig", sector: "Utilities" },
    RegionalListing { symbol: "EBR", name: "Eletrobras", sector: "Utilities" },
    RegionalListing { symbol: "CBD", name: "Grupo Pão de Açúcar", sector: "Consumer Defensive" },
];
