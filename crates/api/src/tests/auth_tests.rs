// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for caller identity resolution.

use crate::{ApiError, AuthError, authenticate};

#[test]
fn test_authenticate_accepts_a_caller_id() {
    let caller = authenticate(Some("user-123")).unwrap();
    assert_eq!(caller.id, "user-123");
}

#[test]
fn test_authenticate_trims_whitespace() {
    let caller = authenticate(Some("  user-123  ")).unwrap();
    assert_eq!(caller.id, "user-123");
}

#[test]
fn test_authenticate_rejects_a_missing_header() {
    let result = authenticate(None);
    assert!(matches!(
        result.unwrap_err(),
        AuthError::AuthenticationFailed { .. }
    ));
}

#[test]
fn test_authenticate_rejects_a_blank_header() {
    let result = authenticate(Some("   "));
    assert!(matches!(
        result.unwrap_err(),
        AuthError::AuthenticationFailed { .. }
    ));
}

#[test]
fn test_auth_error_converts_to_api_error() {
    let err = authenticate(None).unwrap_err();
    let api_err = ApiError::from(err);
    assert!(matches!(api_err, ApiError::AuthenticationFailed { .. }));
}
