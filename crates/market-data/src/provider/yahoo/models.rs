//! Yahoo Finance API response models.
//!
//! These models wrap the v7 batch quote and v10 quoteSummary responses. The
//! quote records themselves deserialize straight into [`RawQuote`]; the
//! quoteSummary result is kept as raw JSON because it is passed through.

use serde::Deserialize;

use crate::models::RawQuote;

/// Main response wrapper for the v7 quote API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooQuoteResponse {
    pub quote_response: YahooQuoteResult,
}

/// Quote response container
#[derive(Debug, Deserialize)]
pub struct YahooQuoteResult {
    #[serde(default)]
    pub result: Vec<RawQuote>,
    #[serde(default)]
    pub error: Option<YahooApiError>,
}

/// Main response wrapper for the quoteSummary API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooQuoteSummaryResponse {
    pub quote_summary: YahooQuoteSummary,
}

/// Quote summary container
#[derive(Debug, Deserialize)]
pub struct YahooQuoteSummary {
    /// `null` when Yahoo reports an error
    #[serde(default)]
    pub result: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    pub error: Option<YahooApiError>,
}

/// Error object embedded in Yahoo responses
#[derive(Debug, Deserialize)]
pub struct YahooApiError {
    pub code: String,
    #[serde(default)]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_quote_response() {
        let json = r#"{
            "quoteResponse": {
                "result": [
                    {"symbol": "VALE", "longName": "Vale S.A.", "regularMarketPrice": 10.5},
                    {"symbol": "PBR", "shortName": "Petrobras", "regularMarketPrice": 14.0}
                ],
                "error": null
            }
        }"#;
        let response: YahooQuoteResponse = serde_json::from_str(json).unwrap();
        let symbols: Vec<&str> = response
            .quote_response
            .result
            .iter()
            .map(|q| q.symbol.as_str())
            .collect();
        assert_eq!(symbols, vec!["VALE", "PBR"]);
        assert!(response.quote_response.error.is_none());
    }

    #[test]
    fn test_deserialize_quote_summary_error() {
        let json = r#"{
            "quoteSummary": {
                "result": null,
                "error": {"code": "Not Found", "description": "Quote not found for symbol: XXXX"}
            }
        }"#;
        let response: YahooQuoteSummaryResponse = serde_json::from_str(json).unwrap();
        assert!(response.quote_summary.result.is_none());
        let error = response.quote_summary.error.unwrap();
        assert_eq!(error.code, "Not Found");
        assert_eq!(error.description, "Quote not found for symbol: XXXX");
    }

    #[test]
    fn test_deserialize_quote_summary_modules() {
        let json = r#"{
            "quoteSummary": {
                "result": [{
                    "assetProfile": {"sector": "Energy", "country": "Brazil"},
                    "summaryDetail": {"marketCap": {"raw": 93562445824, "fmt": "93.56B"}},
                    "financialData": {},
                    "recommendationTrend": {"trend": []},
                    "earnings": {}
                }],
                "error": null
            }
        }"#;
        let response: YahooQuoteSummaryResponse = serde_json::from_str(json).unwrap();
        let result = response.quote_summary.result.unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0]["assetProfile"]["sector"], "Energy");
        assert_eq!(result[0]["summaryDetail"]["marketCap"]["raw"], 93562445824u64);
    }
}
