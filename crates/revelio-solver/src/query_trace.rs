//! Structured query tracing for resolver entry points.
//!
//! Events use target `revelio::query_json` and are intended to be consumed with:
//! `REVELIO_LOG=revelio::query_json=trace REVELIO_LOG_FORMAT=json`.
//!
//! Environment:
//! - `REVELIO_QUERY_RUN_ID`: optional run identifier attached to every event.

use crate::types::{Subject, TypeParamId};
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{Level, trace};

static NEXT_QUERY_ID: AtomicU64 = AtomicU64::new(1);
static QUERY_RUN_ID: OnceLock<String> = OnceLock::new();

#[inline]
pub(crate) fn enabled() -> bool {
    tracing::enabled!(target: "revelio::query_json", Level::TRACE)
}

#[inline]
pub(crate) fn next_query_id() -> u64 {
    NEXT_QUERY_ID.fetch_add(1, Ordering::Relaxed)
}

#[inline]
fn run_id() -> &'static str {
    QUERY_RUN_ID
        .get_or_init(|| {
            std::env::var("REVELIO_QUERY_RUN_ID").unwrap_or_else(|_| "default".to_string())
        })
        .as_str()
}

/// Emitted before the subject is looked up, so queries that fail on an
/// unknown subject still produce a start/end pair.
#[inline]
pub(crate) fn query_start(
    query_id: u64,
    op: &'static str,
    subject: Subject,
    param: Option<TypeParamId>,
) {
    let (subject_kind, subject_id) = match subject {
        Subject::Class(class) => ("class", class.as_u32()),
        Subject::Instance(instance) => ("instance", instance.as_u32()),
    };
    trace!(
        target: "revelio::query_json",
        event = "query",
        phase = "start",
        run_id = run_id(),
        query_id,
        op,
        subject_kind,
        subject_id,
        param_id = param.map(TypeParamId::as_u32)
    );
}

/// `levels` is the ancestry length walked, 0 if the query failed before the
/// walk finished.
#[inline]
pub(crate) fn query_end(
    query_id: u64,
    op: &'static str,
    outcome: &'static str,
    count: usize,
    levels: usize,
) {
    trace!(
        target: "revelio::query_json",
        event = "query",
        phase = "end",
        run_id = run_id(),
        query_id,
        op,
        outcome,
        count,
        levels
    );
}
