#![allow(dead_code)]

use picketlink_rs::{CorsDecision, CorsError, CorsResult, RequestTags};

pub fn assert_actual(decision: CorsDecision) -> CorsResult {
    match decision {
        CorsDecision::Actual(result) => result,
        other => panic!("expected actual decision, got {:?}", other),
    }
}

pub fn assert_preflight(decision: CorsDecision) -> CorsResult {
    match decision {
        CorsDecision::Preflight(result) => result,
        other => panic!("expected preflight decision, got {:?}", other),
    }
}

pub fn assert_generic(decision: CorsDecision) -> Option<RequestTags> {
    match decision {
        CorsDecision::Generic { tags } => tags,
        other => panic!("expected generic decision, got {:?}", other),
    }
}

pub fn assert_rejected(result: Result<CorsDecision, CorsError>) -> CorsError {
    match result {
        Err(err) => err,
        Ok(decision) => panic!("expected rejection, got {:?}", decision),
    }
}
