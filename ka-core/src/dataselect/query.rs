use std::collections::HashMap;
use std::ops::Range;
use std::str::FromStr;

use ka_api::AggregationMode;

use super::*;
use crate::metric::MetricQuery;
use crate::prelude::*;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SortBy {
    pub property: PropertyName,
    pub ascending: bool,
}

impl SortBy {
    pub fn asc(property: PropertyName) -> SortBy {
        SortBy { property, ascending: true }
    }

    pub fn desc(property: PropertyName) -> SortBy {
        SortBy { property, ascending: false }
    }
}

// Parsed from "a,name,d,creationTimestamp": a list of (direction, property) pairs, applied in order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SortQuery {
    pub sort_by: Vec<SortBy>,
}

impl SortQuery {
    pub fn new(sort_by: Vec<SortBy>) -> SortQuery {
        SortQuery { sort_by }
    }
}

impl FromStr for SortQuery {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let parts = split_params(s);
        if parts.len() % 2 != 0 {
            bail!(SelectError::malformed_sort(s));
        }

        let mut sort_by = vec![];
        for pair in parts.chunks(2) {
            let ascending = match pair[0] {
                "a" => true,
                "d" => false,
                _ => bail!(SelectError::malformed_sort(s)),
            };
            sort_by.push(SortBy { property: pair[1].parse()?, ascending });
        }
        Ok(SortQuery { sort_by })
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FilterPredicate {
    Contains { property: PropertyName, value: String },
    RunningPods(bool),
}

// Parsed from "name,web,hasRunningPods,true": a list of (property, value) pairs, all of which have
// to hold for an item to be kept.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FilterQuery {
    pub predicates: Vec<FilterPredicate>,
}

impl FilterQuery {
    pub fn new(predicates: Vec<FilterPredicate>) -> FilterQuery {
        FilterQuery { predicates }
    }
}

impl FromStr for FilterQuery {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let parts = split_params(s);
        if parts.len() % 2 != 0 {
            bail!(SelectError::malformed_filter(s));
        }

        let mut predicates = vec![];
        for pair in parts.chunks(2) {
            let pred = match pair[0] {
                HAS_RUNNING_PODS_FILTER => match pair[1] {
                    "true" => FilterPredicate::RunningPods(true),
                    "false" => FilterPredicate::RunningPods(false),
                    _ => bail!(SelectError::malformed_filter(s)),
                },
                key => FilterPredicate::Contains { property: key.parse()?, value: pair[1].into() },
            };
            predicates.push(pred);
        }
        Ok(FilterQuery { predicates })
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PaginationQuery {
    pub items_per_page: usize,
    pub page: usize,
}

impl PaginationQuery {
    pub fn new(items_per_page: usize, page: usize) -> anyhow::Result<PaginationQuery> {
        if items_per_page == 0 {
            bail!(SelectError::invalid_pagination("itemsPerPage must be positive"));
        }
        Ok(PaginationQuery { items_per_page, page })
    }

    // Pages are 0-indexed; a page past the end is empty rather than an error
    pub fn range(&self, total: usize) -> Range<usize> {
        let start = self.page.saturating_mul(self.items_per_page).min(total);
        let end = start.saturating_add(self.items_per_page).min(total);
        start..end
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DataSelectQuery {
    pub pagination: Option<PaginationQuery>,
    pub sort: SortQuery,
    pub filter: FilterQuery,
    pub metrics: Option<MetricQuery>,
}

impl DataSelectQuery {
    pub fn new() -> DataSelectQuery {
        DataSelectQuery::default()
    }

    pub fn with_pagination(mut self, items_per_page: usize, page: usize) -> anyhow::Result<DataSelectQuery> {
        self.pagination = Some(PaginationQuery::new(items_per_page, page)?);
        Ok(self)
    }

    pub fn with_sort(mut self, sort: SortQuery) -> DataSelectQuery {
        self.sort = sort;
        self
    }

    pub fn with_filter(mut self, filter: FilterQuery) -> DataSelectQuery {
        self.filter = filter;
        self
    }

    pub fn with_metrics(mut self, metrics: MetricQuery) -> DataSelectQuery {
        self.metrics = Some(metrics);
        self
    }

    /// Build a query from the raw string parameters of a list request.
    ///
    /// `itemsPerPage` and `page` must either both be present or both be absent.  Metrics are only
    /// requested if `metricNames` is present and non-empty; `aggregations` without any metric
    /// names is ignored.
    pub fn from_params(params: &HashMap<String, String>) -> anyhow::Result<DataSelectQuery> {
        let param = |name: &str| params.get(name).map(|v| v.trim()).filter(|v| !v.is_empty());

        let pagination = match (param(ITEMS_PER_PAGE_PARAM), param(PAGE_PARAM)) {
            (None, None) => None,
            (Some(per_page), Some(page)) => {
                let per_page = per_page
                    .parse::<usize>()
                    .map_err(|_| SelectError::invalid_pagination(&format!("{ITEMS_PER_PAGE_PARAM}={per_page}")))?;
                let page = page
                    .parse::<usize>()
                    .map_err(|_| SelectError::invalid_pagination(&format!("{PAGE_PARAM}={page}")))?;
                Some(PaginationQuery::new(per_page, page)?)
            },
            _ => bail!(SelectError::invalid_pagination("itemsPerPage and page must be set together")),
        };

        let sort = param(SORT_BY_PARAM).map(SortQuery::from_str).transpose()?.unwrap_or_default();
        let filter = param(FILTER_BY_PARAM).map(FilterQuery::from_str).transpose()?.unwrap_or_default();

        let metrics = match param(METRIC_NAMES_PARAM) {
            None => None,
            Some(names) => {
                let names = split_params(names).into_iter().map(String::from).collect();
                let aggregations = param(AGGREGATIONS_PARAM)
                    .map(|aggs| {
                        split_params(aggs)
                            .into_iter()
                            .map(|a| a.parse::<AggregationMode>().map_err(|e| SelectError::invalid_aggregation(&e)))
                            .collect::<anyhow::Result<Vec<_>>>()
                    })
                    .transpose()?
                    .unwrap_or_default();
                Some(MetricQuery::new(names, aggregations))
            },
        };

        Ok(DataSelectQuery { pagination, sort, filter, metrics })
    }
}

fn split_params(s: &str) -> Vec<&str> {
    s.split(',').map(str::trim).filter(|p| !p.is_empty()).collect()
}
