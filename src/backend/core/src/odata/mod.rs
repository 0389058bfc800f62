//! OData v2 query surface: the restricted `$filter` grammar, the skip/top
//! query pipeline, and the `{"d": ...}` response envelope.

pub mod envelope;
pub mod filter;
pub mod query;

pub use envelope::{ODataError, ODataList, ODataSingle};
pub use filter::{parse_filter, Clause, FilterOp};
pub use query::{query_page, ListParams, DEFAULT_TOP};
