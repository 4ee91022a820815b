//! Query string for the remote ranking API.
//!
//! Weights go out as `group_<id>=<fraction>`, followed by any discipline and
//! industry filters, all joined with `&`.

use pathrank_common::{ApiConfig, PathrankError, Result};
use urlencoding::encode;

use crate::weights::NormalizedWeights;

/// Which ranking endpoint to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingCategory {
    Country,
    University,
}

impl RankingCategory {
    pub fn endpoint(&self) -> &'static str {
        match self {
            RankingCategory::Country => "country-rankings",
            RankingCategory::University => "university-rankings",
        }
    }
}

#[derive(Debug, Clone)]
pub struct RankingQuery<'a> {
    weights: &'a NormalizedWeights,
    disciplines: Vec<String>,
    industries: Vec<String>,
}

impl<'a> RankingQuery<'a> {
    /// Refuses weights that are all zero: ranking cannot start until at
    /// least one group matters.
    pub fn new(weights: &'a NormalizedWeights) -> Result<Self> {
        if !weights.is_adjusted() {
            return Err(PathrankError::WeightsNotAdjusted);
        }
        Ok(Self { weights, disciplines: Vec::new(), industries: Vec::new() })
    }

    pub fn with_disciplines<I, S>(mut self, disciplines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.disciplines.extend(disciplines.into_iter().map(Into::into));
        self
    }

    pub fn with_industries<I, S>(mut self, industries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.industries.extend(industries.into_iter().map(Into::into));
        self
    }

    pub fn to_query_string(&self) -> String {
        let weights = self
            .weights
            .iter()
            .map(|(group, w)| format!("group_{}={}", encode(group), w));
        let disciplines = self.disciplines.iter().map(|d| format!("discipline={}", encode(d)));
        let industries = self.industries.iter().map(|i| format!("industry={}", encode(i)));

        weights.chain(disciplines).chain(industries).collect::<Vec<_>>().join("&")
    }

    /// Full request URL for `category` under the configured base URL.
    pub fn url(&self, api: &ApiConfig, category: RankingCategory) -> String {
        format!(
            "{}/{}?{}",
            api.base_url.trim_end_matches('/'),
            category.endpoint(),
            self.to_query_string()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weights(pairs: &[(&str, f64)]) -> NormalizedWeights {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_weights_and_filters() {
        let w = weights(&[("2", 0.5), ("1", 0.5)]);
        let q = RankingQuery::new(&w)
            .unwrap()
            .with_disciplines(["Law & Policy"])
            .with_industries(vec!["Energy & Utilities".to_string()]);
        assert_eq!(
            q.to_query_string(),
            "group_1=0.5&group_2=0.5&discipline=Law%20%26%20Policy&industry=Energy%20%26%20Utilities"
        );
    }

    #[test]
    fn test_zero_weights_print_plainly() {
        let w = weights(&[("1", 1.0), ("2", 0.0)]);
        let q = RankingQuery::new(&w).unwrap();
        assert_eq!(q.to_query_string(), "group_1=1&group_2=0");
    }

    #[test]
    fn test_unadjusted_weights_refused() {
        let w = NormalizedWeights::zeroed(&["1", "2"]);
        assert!(matches!(RankingQuery::new(&w), Err(PathrankError::WeightsNotAdjusted)));
    }

    #[test]
    fn test_url() {
        let w = weights(&[("7", 1.0)]);
        let api = ApiConfig { base_url: "https://example.org/".to_string() };
        let url = RankingQuery::new(&w).unwrap().url(&api, RankingCategory::University);
        assert_eq!(url, "https://example.org/university-rankings?group_7=1");
    }
}
