//! FFI bindings for interview scoring
//!
//! C-compatible functions for calling the scorer from other languages.
//! All functions take null-terminated C strings and return allocated memory
//! that must be freed by the caller using `iscore_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::config::ScoringParams;
use crate::pipeline::{parse_input, score_interview_json, ScoreCalculator};
use crate::validate::validate_input;

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Helper to convert C string to Rust string
unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Helper to convert Rust string to C string (caller must free)
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

// ============================================================================
// Stateless API
// ============================================================================

/// Score an interview JSON document with the reference model.
///
/// # Safety
/// - `json` must be a valid null-terminated C string.
/// - Returns a newly allocated report JSON string that must be freed with `iscore_free_string`.
/// - Returns NULL on error; call `iscore_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn iscore_score_json(json: *const c_char) -> *mut c_char {
    clear_last_error();

    let json_str = match cstr_to_string(json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid JSON string pointer");
            return ptr::null_mut();
        }
    };

    match score_interview_json(&json_str) {
        Ok(report) => string_to_cstr(&report),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Validate an interview JSON document and return the findings as a JSON array.
///
/// # Safety
/// - `json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `iscore_free_string`.
/// - Returns NULL if the document cannot be parsed; call `iscore_last_error` for details.
#[no_mangle]
pub unsafe extern "C" fn iscore_validate_json(json: *const c_char) -> *mut c_char {
    clear_last_error();

    let json_str = match cstr_to_string(json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid JSON string pointer");
            return ptr::null_mut();
        }
    };

    let input = match parse_input(&json_str) {
        Ok(input) => input,
        Err(e) => {
            set_last_error(&e.to_string());
            return ptr::null_mut();
        }
    };

    match serde_json::to_string(&validate_input(&input)) {
        Ok(issues) => string_to_cstr(&issues),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Calculator API
// ============================================================================

/// Opaque handle to a ScoreCalculator
pub struct ScoreCalculatorHandle {
    calculator: ScoreCalculator,
}

/// Create a calculator from model parameters JSON, or the reference model when `params_json` is NULL.
///
/// # Safety
/// - `params_json` must be NULL or a valid null-terminated C string.
/// - Must be freed with `iscore_calculator_free`.
/// - Returns NULL on error; call `iscore_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn iscore_calculator_new(
    params_json: *const c_char,
) -> *mut ScoreCalculatorHandle {
    clear_last_error();

    let params = if params_json.is_null() {
        ScoringParams::default()
    } else {
        let json_str = match cstr_to_string(params_json) {
            Some(s) => s,
            None => {
                set_last_error("Invalid params string pointer");
                return ptr::null_mut();
            }
        };
        match serde_json::from_str::<ScoringParams>(&json_str) {
            Ok(params) => params,
            Err(e) => {
                set_last_error(&format!("Invalid scoring params: {e}"));
                return ptr::null_mut();
            }
        }
    };

    let handle = Box::new(ScoreCalculatorHandle {
        calculator: ScoreCalculator::with_params(params),
    });
    Box::into_raw(handle)
}

/// Free a calculator.
///
/// # Safety
/// - `calculator` must be a valid pointer returned by `iscore_calculator_new`, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn iscore_calculator_free(calculator: *mut ScoreCalculatorHandle) {
    if !calculator.is_null() {
        drop(Box::from_raw(calculator));
    }
}

/// Score an interview JSON document with a calculator.
///
/// # Safety
/// - `calculator` must be a valid pointer returned by `iscore_calculator_new`.
/// - `json` must be a valid null-terminated C string.
/// - Returns a newly allocated report JSON string that must be freed with `iscore_free_string`.
/// - Returns NULL on error; call `iscore_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn iscore_calculator_score(
    calculator: *const ScoreCalculatorHandle,
    json: *const c_char,
) -> *mut c_char {
    clear_last_error();

    if calculator.is_null() {
        set_last_error("Null calculator pointer");
        return ptr::null_mut();
    }

    let handle = &*calculator;

    let json_str = match cstr_to_string(json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid JSON string pointer");
            return ptr::null_mut();
        }
    };

    let result = parse_input(&json_str)
        .and_then(|input| handle.calculator.calculate(&input.questions, &input.config))
        .and_then(|report| serde_json::to_string(&report).map_err(Into::into));

    match result {
        Ok(report) => string_to_cstr(&report),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free a string returned by scoring functions.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by an `iscore_*` function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn iscore_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Get the last error message.
///
/// # Safety
/// - Returns a pointer to a thread-local error string.
/// - The returned pointer is valid until the next `iscore_*` call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn iscore_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

// ============================================================================
// Version Information
// ============================================================================

/// Get the library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn iscore_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_interview_json() -> CString {
        CString::new(
            r#"{
            "questions": [{
                "T_think": 120, "T_total": 600, "T_stuck": 45,
                "E_covered": 3, "E_total": 4,
                "C_initial": 2.0, "C_final": 1.0, "C_target": 1.0,
                "S_lint": 0.85, "K_useful": 400, "K_total": 550,
                "S_sentiment": 0.8, "H_types": [1], "Q_difficulty": 2
            }],
            "config": {
                "weights": { "ps": 0.4, "code": 0.3, "resilience": 0.1, "autonomy": 0.2 },
                "hint_budget": 1.0
            }
        }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_ffi_score_json() {
        let json = sample_interview_json();

        unsafe {
            let result = iscore_score_json(json.as_ptr());
            assert!(!result.is_null());

            let result_str = CStr::from_ptr(result).to_str().unwrap();
            let value: serde_json::Value = serde_json::from_str(result_str).unwrap();
            assert_eq!(value["autonomy"], 5.0);

            iscore_free_string(result);
        }
    }

    #[test]
    fn test_ffi_validate_json() {
        let json = sample_interview_json();

        unsafe {
            let result = iscore_validate_json(json.as_ptr());
            assert!(!result.is_null());

            let result_str = CStr::from_ptr(result).to_str().unwrap();
            assert_eq!(result_str, "[]");

            iscore_free_string(result);
        }
    }

    #[test]
    fn test_ffi_calculator_lifecycle() {
        let params = CString::new(
            serde_json::to_string(&ScoringParams {
                precision: 1,
                ..ScoringParams::default()
            })
            .unwrap(),
        )
        .unwrap();
        let json = sample_interview_json();

        unsafe {
            let calculator = iscore_calculator_new(params.as_ptr());
            assert!(!calculator.is_null());

            let result = iscore_calculator_score(calculator, json.as_ptr());
            assert!(!result.is_null());

            let value: serde_json::Value =
                serde_json::from_str(CStr::from_ptr(result).to_str().unwrap()).unwrap();
            assert_eq!(value["ps"], 8.5);

            iscore_free_string(result);
            iscore_calculator_free(calculator);

            let reference = iscore_calculator_new(ptr::null());
            assert!(!reference.is_null());
            iscore_calculator_free(reference);
        }
    }

    #[test]
    fn test_ffi_error_handling() {
        unsafe {
            let invalid_json = CString::new("not json").unwrap();
            let result = iscore_score_json(invalid_json.as_ptr());
            assert!(result.is_null());

            let error = iscore_last_error();
            assert!(!error.is_null());

            let error_str = CStr::from_ptr(error).to_str().unwrap();
            assert!(error_str.contains("Failed to parse"));

            let result = iscore_calculator_score(ptr::null(), invalid_json.as_ptr());
            assert!(result.is_null());
        }
    }

    #[test]
    fn test_ffi_version() {
        unsafe {
            let version = iscore_version();
            assert!(!version.is_null());

            let version_str = CStr::from_ptr(version).to_str().unwrap();
            assert_eq!(version_str, crate::SCORE_VERSION);
        }
    }
}
