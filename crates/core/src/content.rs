//! Content kinds exposed by the public API.
//!
//! Posts and memos are stored in separate tables. The post API still reports
//! a `type` field and accepts it as a listing filter, so the kind is modelled
//! here once.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Post,
    Memo,
}
