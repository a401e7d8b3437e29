//! C-ABI wrapper around `todos-core`.
//!
//! # Overview
//! Exposes the four todos operations through `extern "C"` functions so a UI
//! host in any language with a C FFI can build requests and parse responses
//! without linking to an async runtime or serde.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Per-operation `build_*` / `parse_*` mirrors `TodoClient` 1:1.
//! - A single `FfiTodoResult` envelope with `FfiDataTag` + `void* data`
//!   conveys success payloads and errors uniformly.
//! - The C caller owns all returned pointers and must call the matching
//!   `todos_free_*` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::catch_unwind;

use todos_core::{ClientConfig, HttpResponse, NewTodo, TodoClient, TodoPatch};

use types::*;

/// Borrow a C string as UTF-8, treating invalid text as empty.
///
/// # Safety
/// `ptr` must be non-null and point to a NUL-terminated string.
unsafe fn text<'a>(ptr: *const c_char) -> &'a str {
    unsafe { CStr::from_ptr(ptr) }.to_str().unwrap_or("")
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new client bound to `base_url`, scoping list queries to `owner`.
///
/// Returns null if `base_url` is null or if an internal panic occurs.
/// The caller must free the returned pointer with `todos_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn todos_client_new(base_url: *const c_char, owner: u64) -> *mut FfiTodoClient {
    catch_unwind(|| {
        if base_url.is_null() {
            return std::ptr::null_mut();
        }
        let config = ClientConfig::new(unsafe { text(base_url) }).with_owner(owner);
        let client = TodoClient::with_config(config);
        Box::into_raw(Box::new(FfiTodoClient { inner: client }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `todos_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn todos_client_free(client: *mut FfiTodoClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

/// The owner id list queries are scoped to. Returns 0 for a null client.
#[unsafe(no_mangle)]
pub extern "C" fn todos_client_owner(client: *const FfiTodoClient) -> u64 {
    if client.is_null() {
        return 0;
    }
    unsafe { &*client }.inner.owner()
}

// ---------------------------------------------------------------------------
// Build request functions
// ---------------------------------------------------------------------------

/// Build `GET /todos?userId=<owner>`.
///
/// Returns null if `client` is null.
/// The caller must free the returned pointer with `todos_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn todos_build_get_todos(client: *const FfiTodoClient) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        FfiHttpRequest::from_core(client.inner.build_get_todos())
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build `POST /todos` for a todo owned by the client's owner.
///
/// Returns null if `client` or `title` is null, or if serialization fails.
#[unsafe(no_mangle)]
pub extern "C" fn todos_build_post_todo(
    client: *const FfiTodoClient,
    title: *const c_char,
    completed: bool,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() || title.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let mut input = NewTodo::new(client.inner.owner(), unsafe { text(title) });
        input.completed = completed;
        match client.inner.build_post_todo(&input) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build `DELETE /todos/<id>`.
///
/// Returns null if `client` is null.
#[unsafe(no_mangle)]
pub extern "C" fn todos_build_delete_todo(
    client: *const FfiTodoClient,
    id: u64,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        FfiHttpRequest::from_core(client.inner.build_delete_todo(id))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build `PATCH /todos/<id>` carrying only the fields supplied.
///
/// `title` may be null (not sent). `completed` uses tri-state:
/// -1 = not sent, 0 = false, 1 = true.
/// Returns null if `client` is null.
#[unsafe(no_mangle)]
pub extern "C" fn todos_build_patch_todo(
    client: *const FfiTodoClient,
    id: u64,
    title: *const c_char,
    completed: i32,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let patch = TodoPatch {
            title: (!title.is_null()).then(|| unsafe { text(title) }.to_string()),
            completed: match completed {
                0 => Some(false),
                1 => Some(true),
                _ => None,
            },
            ..TodoPatch::default()
        };
        match client.inner.build_patch_todo(&patch, id) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Parse response functions
// ---------------------------------------------------------------------------

/// Convert an `FfiHttpResponse` to a core `HttpResponse`. A null body reads
/// as the empty string.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> HttpResponse {
    let body = if resp.body.is_null() {
        String::new()
    } else {
        unsafe { text(resp.body) }.to_string()
    };
    HttpResponse {
        status: resp.status,
        headers: Vec::new(),
        body,
    }
}

/// Shared argument checks and panic guard for the `todos_parse_*` family.
fn parse_with(
    op: &str,
    client: *const FfiTodoClient,
    response: *const FfiHttpResponse,
    parse: impl FnOnce(&TodoClient, HttpResponse) -> *mut FfiTodoResult + std::panic::UnwindSafe,
) -> *mut FfiTodoResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiTodoResult::null_arg("client");
        }
        if response.is_null() {
            return FfiTodoResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = ffi_response_to_core(unsafe { &*response });
        parse(&client.inner, resp)
    })
    .unwrap_or_else(|_| FfiTodoResult::panic(&format!("panic in todos_parse_{op}")))
}

/// Parse the response to `todos_build_get_todos`.
///
/// Returns a result with `data_tag = TodoList` on success.
#[unsafe(no_mangle)]
pub extern "C" fn todos_parse_get_todos(
    client: *const FfiTodoClient,
    response: *const FfiHttpResponse,
) -> *mut FfiTodoResult {
    parse_with("get_todos", client, response, |client, resp| {
        match client.parse_get_todos(resp) {
            Ok(todos) => FfiTodoResult::ok_todo_list(todos),
            Err(e) => FfiTodoResult::from_error(e),
        }
    })
}

/// Parse the response to `todos_build_post_todo`.
///
/// Returns a result with `data_tag = Todo` on success.
#[unsafe(no_mangle)]
pub extern "C" fn todos_parse_post_todo(
    client: *const FfiTodoClient,
    response: *const FfiHttpResponse,
) -> *mut FfiTodoResult {
    parse_with("post_todo", client, response, |client, resp| {
        match client.parse_post_todo(resp) {
            Ok(todo) => FfiTodoResult::ok_todo(todo),
            Err(e) => FfiTodoResult::from_error(e),
        }
    })
}

/// Parse the response to `todos_build_delete_todo`.
///
/// Returns a result with `data_tag = None` on any 2xx status.
#[unsafe(no_mangle)]
pub extern "C" fn todos_parse_delete_todo(
    client: *const FfiTodoClient,
    response: *const FfiHttpResponse,
) -> *mut FfiTodoResult {
    parse_with("delete_todo", client, response, |client, resp| {
        match client.parse_delete_todo(resp) {
            Ok(()) => FfiTodoResult::ok_empty(),
            Err(e) => FfiTodoResult::from_error(e),
        }
    })
}

/// Parse the response to `todos_build_patch_todo`.
///
/// Returns a result with `data_tag = Todo` on success.
#[unsafe(no_mangle)]
pub extern "C" fn todos_parse_patch_todo(
    client: *const FfiTodoClient,
    response: *const FfiHttpResponse,
) -> *mut FfiTodoResult {
    parse_with("patch_todo", client, response, |client, resp| {
        match client.parse_patch_todo(resp) {
            Ok(todo) => FfiTodoResult::ok_todo(todo),
            Err(e) => FfiTodoResult::from_error(e),
        }
    })
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by any `todos_build_*` function.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn todos_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        todos_free_string(req.url);
        todos_free_string(req.body);
        if !req.headers.is_null() && req.headers_len > 0 {
            let headers =
                std::ptr::slice_from_raw_parts_mut(req.headers, req.headers_len as usize);
            let headers = unsafe { Box::from_raw(headers) };
            for h in headers.iter() {
                todos_free_string(h.key);
                todos_free_string(h.value);
            }
        }
    });
}

/// Free an `FfiTodoResult` returned by any `todos_parse_*` function.
/// Safe to call with null. Uses `data_tag` to determine what `data` points to.
#[unsafe(no_mangle)]
pub extern "C" fn todos_free_result(result: *mut FfiTodoResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        todos_free_string(result.error_message);
        if result.data.is_null() {
            return;
        }
        match result.data_tag {
            FfiDataTag::Todo => {
                let todo = unsafe { Box::from_raw(result.data as *mut FfiTodo) };
                todos_free_string(todo.title);
            }
            FfiDataTag::TodoList => {
                let list = unsafe { Box::from_raw(result.data as *mut FfiTodoList) };
                if !list.items.is_null() && list.len > 0 {
                    let items = std::ptr::slice_from_raw_parts_mut(list.items, list.len as usize);
                    let items = unsafe { Box::from_raw(items) };
                    for item in items.iter() {
                        todos_free_string(item.title);
                    }
                }
            }
            FfiDataTag::None => {}
        }
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn todos_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { CString::from_raw(s) });
        });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
