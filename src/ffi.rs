//! FFI bindings for Yoga Fuel
//!
//! This module provides C-compatible functions for calling Yoga Fuel from other
//! languages. All functions take C strings (null-terminated) and return
//! allocated memory that must be freed by the caller using `fuel_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::catalog::FoodCatalog;
use crate::error::RecommendError;
use crate::pipeline::{
    catalog_to_json, goal_meals_to_json, post_session_to_json, pre_session_to_json,
    search_foods_to_json, MealRecommender,
};
use crate::types::SessionDescriptor;

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

/// Convert a JSON result into an owned C string, recording any error
fn into_cstr(result: Result<String, RecommendError>) -> *mut c_char {
    match result {
        Ok(json) => string_to_cstr(&json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Stateless API (embedded catalog, system clock)
// ============================================================================

/// Recommend post-session meals for a session descriptor JSON object.
///
/// # Safety
/// - `session_json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `fuel_free_string`.
/// - Returns NULL on error; call `fuel_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn fuel_recommend_post_session(session_json: *const c_char) -> *mut c_char {
    clear_last_error();

    let json_str = match cstr_to_string(session_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid session JSON string pointer");
            return ptr::null_mut();
        }
    };

    into_cstr(post_session_to_json(json_str))
}

/// Suggest pre-session meals for an ISO-8601 start time.
///
/// # Safety
/// - `scheduled_time` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `fuel_free_string`.
/// - Returns NULL on error; call `fuel_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn fuel_recommend_pre_session(scheduled_time: *const c_char) -> *mut c_char {
    clear_last_error();

    let time_str = match cstr_to_string(scheduled_time) {
        Some(s) => s,
        None => {
            set_last_error("Invalid scheduled time string pointer");
            return ptr::null_mut();
        }
    };

    into_cstr(pre_session_to_json(time_str))
}

/// Goal-filtered meals as a JSON array.
///
/// # Safety
/// - `goal` must be a valid null-terminated C string.
/// - `meal_type` may be NULL (defaults to lunch) or a valid C string.
/// - Returns a newly allocated string that must be freed with `fuel_free_string`.
/// - Returns NULL on error; call `fuel_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn fuel_meals_by_goal(
    goal: *const c_char,
    meal_type: *const c_char,
) -> *mut c_char {
    clear_last_error();

    let goal_str = match cstr_to_string(goal) {
        Some(s) => s,
        None => {
            set_last_error("Invalid goal string pointer");
            return ptr::null_mut();
        }
    };

    into_cstr(goal_meals_to_json(goal_str, cstr_to_string(meal_type)))
}

/// Search the catalog by name or localized name.
///
/// # Safety
/// - `query` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `fuel_free_string`.
/// - Returns NULL on error; call `fuel_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn fuel_search_foods(query: *const c_char) -> *mut c_char {
    clear_last_error();

    let query_str = match cstr_to_string(query) {
        Some(s) => s,
        None => {
            set_last_error("Invalid query string pointer");
            return ptr::null_mut();
        }
    };

    into_cstr(search_foods_to_json(query_str))
}

/// Return the catalog, or one bucket of it.
///
/// # Safety
/// - `category` may be NULL (whole catalog) or a valid C string.
/// - Returns a newly allocated string that must be freed with `fuel_free_string`.
#[no_mangle]
pub unsafe extern "C" fn fuel_catalog(category: *const c_char) -> *mut c_char {
    clear_last_error();
    into_cstr(catalog_to_json(cstr_to_string(category)))
}

// ============================================================================
// Recommender API (caller-supplied catalog)
// ============================================================================

/// Opaque handle to a MealRecommender
pub struct FuelRecommenderHandle {
    recommender: MealRecommender,
}

/// Create a recommender over a catalog JSON object.
///
/// # Safety
/// - `catalog_json` may be NULL (embedded catalog) or a valid C string.
/// - Returns a pointer that must be freed with `fuel_recommender_free`.
/// - Returns NULL on error; call `fuel_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn fuel_recommender_new(
    catalog_json: *const c_char,
) -> *mut FuelRecommenderHandle {
    clear_last_error();

    let catalog = match cstr_to_string(catalog_json) {
        Some(json) => FoodCatalog::from_json(&json),
        None => FoodCatalog::builtin(),
    };

    match catalog {
        Ok(catalog) => {
            let handle = Box::new(FuelRecommenderHandle {
                recommender: MealRecommender::new(catalog),
            });
            Box::into_raw(handle)
        }
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Free a recommender.
///
/// # Safety
/// - `recommender` must be a valid pointer returned by `fuel_recommender_new`.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn fuel_recommender_free(recommender: *mut FuelRecommenderHandle) {
    if !recommender.is_null() {
        drop(Box::from_raw(recommender));
    }
}

/// Recommend post-session meals with a recommender handle.
///
/// # Safety
/// - `recommender` must be a valid pointer returned by `fuel_recommender_new`.
/// - `session_json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `fuel_free_string`.
/// - Returns NULL on error; call `fuel_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn fuel_recommender_post_session(
    recommender: *const FuelRecommenderHandle,
    session_json: *const c_char,
) -> *mut c_char {
    clear_last_error();

    if recommender.is_null() {
        set_last_error("Null recommender pointer");
        return ptr::null_mut();
    }

    let handle = &*recommender;

    let json_str = match cstr_to_string(session_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid session JSON string pointer");
            return ptr::null_mut();
        }
    };

    into_cstr(
        serde_json::from_str::<SessionDescriptor>(&json_str)
            .map_err(RecommendError::from)
            .and_then(|session| {
                let report = handle.recommender.recommend_post_session(&session);
                serde_json::to_string(&report).map_err(RecommendError::from)
            }),
    )
}

/// Suggest pre-session meals with a recommender handle.
///
/// # Safety
/// - `recommender` must be a valid pointer returned by `fuel_recommender_new`.
/// - `scheduled_time` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `fuel_free_string`.
/// - Returns NULL on error; call `fuel_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn fuel_recommender_pre_session(
    recommender: *const FuelRecommenderHandle,
    scheduled_time: *const c_char,
) -> *mut c_char {
    clear_last_error();

    if recommender.is_null() {
        set_last_error("Null recommender pointer");
        return ptr::null_mut();
    }

    let handle = &*recommender;

    let time_str = match cstr_to_string(scheduled_time) {
        Some(s) => s,
        None => {
            set_last_error("Invalid scheduled time string pointer");
            return ptr::null_mut();
        }
    };

    into_cstr(
        handle
            .recommender
            .recommend_pre_session(&time_str)
            .and_then(|report| serde_json::to_string(&report).map_err(RecommendError::from)),
    )
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free a string returned by any Yoga Fuel function.
///
/// # Safety
/// - `ptr` must be a pointer returned by a Yoga Fuel function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn fuel_free_string(ptr: *mut c_char) {
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
/// - The returned pointer is valid until the next Yoga Fuel call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn fuel_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

// ============================================================================
// Version Information
// ============================================================================

/// Get the Yoga Fuel library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn fuel_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}
