//! Refund metrics. A refund is any line item of a canceled order.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use super::MetricResult;
use crate::dataset::DatasetStore;
use crate::filter::{FilterContext, MAX_REVIEW_SCORE, MIN_REVIEW_SCORE};
use crate::join::{join_with_reviews, FactTable};
use crate::model::Category;

/// Number of refunded line items in one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRefunds {
    pub category: Category,
    pub refunds: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreCount {
    pub score: u8,
    pub count: u64,
}

/// Review score frequencies. Every score from 1 to 5 is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewDistribution {
    pub counts: Vec<ScoreCount>,
}

impl ReviewDistribution {
    pub fn count(&self, score: u8) -> Option<u64> {
        self.counts.iter().find(|c| c.score == score).map(|c| c.count)
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|c| c.count).sum()
    }
}

/// Refunded line items per category, highest first, truncated to top-N.
pub fn refunds_by_category(
    ctx: &FilterContext,
    store: &DatasetStore,
) -> MetricResult<Vec<CategoryRefunds>> {
    let facts = FactTable::build(store, ctx);

    let mut counts: BTreeMap<&Category, u64> = BTreeMap::new();
    for row in facts.refunds() {
        *counts.entry(row.category()).or_default() += 1;
    }

    let mut ranked: Vec<CategoryRefunds> = counts
        .into_iter()
        .map(|(category, refunds)| CategoryRefunds {
            category: category.clone(),
            refunds,
        })
        .collect();
    ranked.sort_by(|a, b| b.refunds.cmp(&a.refunds));
    ranked.truncate(ctx.top_n());

    if ranked.is_empty() {
        debug!("refunds by category: no canceled orders");
    }
    MetricResult::from_rows(ranked)
}

/// Review scores of refunded line items within the review-score range.
pub fn refund_review_distribution(
    ctx: &FilterContext,
    store: &DatasetStore,
) -> MetricResult<ReviewDistribution> {
    let facts = FactTable::build(store, ctx);
    let refunds = facts.refunds();
    let range = ctx.review_score();

    let mut counts: BTreeMap<u8, u64> = (MIN_REVIEW_SCORE..=MAX_REVIEW_SCORE)
        .map(|score| (score, 0))
        .collect();
    let mut matched = 0usize;
    for reviewed in join_with_reviews(&refunds, store) {
        let score = reviewed.review_score();
        if range.contains(score) {
            *counts.entry(score).or_default() += 1;
            matched += 1;
        }
    }

    if matched == 0 {
        debug!("refund review distribution: no reviews in range");
        return MetricResult::Empty;
    }

    MetricResult::Data(ReviewDistribution {
        counts: counts
            .into_iter()
            .map(|(score, count)| ScoreCount { score, count })
            .collect(),
    })
}
