mod cell;
mod query;
mod select;

pub use cell::*;
pub use query::*;
pub use select::*;

use crate::errors::*;

err_impl! {SelectError,
    #[error("unknown property: {0}")]
    UnknownProperty(String),

    #[error("property {0} cannot be resolved for every item")]
    UnresolvableProperty(String),

    #[error("malformed filter: {0}")]
    MalformedFilter(String),

    #[error("malformed sort: {0}")]
    MalformedSort(String),

    #[error("invalid pagination: {0}")]
    InvalidPagination(String),

    #[error("invalid aggregation: {0}")]
    InvalidAggregation(String),
}

#[cfg(test)]
mod tests;
