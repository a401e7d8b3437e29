//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! tagged enums with explicit discriminants. Conversion functions live here
//! to keep `lib.rs` focused on the `extern "C"` surface.

use std::ffi::{c_void, CString};
use std::os::raw::c_char;

use todos_core::{ApiError, HttpMethod, HttpRequest, Todo};

/// Opaque handle to a `TodoClient`. C callers receive a pointer to this
/// and pass it back into every FFI function.
pub struct FfiTodoClient {
    pub(crate) inner: todos_core::TodoClient,
}

/// Owned C string for library-produced text (urls, headers, messages).
/// An interior NUL is written out as the two characters `\0` so nothing
/// after it is lost.
pub(crate) fn c_string(text: String) -> *mut c_char {
    CString::new(text.replace('\0', "\\0")).unwrap_or_default().into_raw()
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
    Patch = 2,
    Delete = 3,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
            HttpMethod::Patch => FfiHttpMethod::Patch,
            HttpMethod::Delete => FfiHttpMethod::Delete,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data.
///
/// Built by `todos_build_*` functions. The C caller executes the request
/// and passes the response back through `todos_parse_*`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: HttpRequest) -> *mut Self {
        let url = c_string(req.url);
        let body = req.body.map_or(std::ptr::null_mut(), c_string);

        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Box<[FfiHeader]> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: c_string(k),
                    value: c_string(v),
                })
                .collect();
            Box::into_raw(ffi_headers) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            url,
            headers,
            headers_len,
            body,
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this on the stack after executing an HTTP request,
/// then passes a pointer to a `todos_parse_*` function. The FFI layer reads
/// but does not free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiTodoResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    NotFound = 1,
    Http = 2,
    Deserialization = 3,
    Serialization = 4,
    Panic = 5,
    NullArg = 6,
    /// A server string cannot be handed to C because it contains a NUL byte.
    InvalidString = 7,
}

/// Tag that tells `todos_free_result` what `FfiTodoResult::data` points to.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiDataTag {
    None = 0,
    Todo = 1,
    TodoList = 2,
}

/// A single todo exposed to C.
///
/// Fields the server left out read as `user_id = 0`, `title = NULL` and
/// `completed = false`. Extra server fields are not carried across.
#[repr(C)]
pub struct FfiTodo {
    pub id: u64,
    pub user_id: u64,
    pub title: *mut c_char,
    pub completed: bool,
}

impl FfiTodo {
    /// Callers must reject titles with interior NULs first (see `nul_title`).
    fn from_core(todo: Todo) -> Self {
        FfiTodo {
            id: todo.id,
            user_id: todo.user_id.unwrap_or_default(),
            title: todo.title.map_or(std::ptr::null_mut(), c_string),
            completed: todo.completed.unwrap_or_default(),
        }
    }
}

/// First todo whose title would not survive as a C string.
fn nul_title<'a>(todos: impl IntoIterator<Item = &'a Todo>) -> Option<&'a Todo> {
    todos
        .into_iter()
        .find(|todo| todo.title.as_deref().is_some_and(|title| title.contains('\0')))
}

/// A list of todos exposed to C.
#[repr(C)]
pub struct FfiTodoList {
    pub items: *mut FfiTodo,
    pub len: u32,
}

/// Result envelope for all parse operations.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `data`
/// points to the parsed payload (tagged by `data_tag`).
/// On failure `error_code` describes the category, `error_message` is a
/// human-readable C string, and `data` is null.
#[repr(C)]
pub struct FfiTodoResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub data_tag: FfiDataTag,
    pub data: *mut c_void,
}

impl FfiTodoResult {
    fn boxed(
        error_code: FfiErrorCode,
        error_message: *mut c_char,
        http_status: u16,
        data_tag: FfiDataTag,
        data: *mut c_void,
    ) -> *mut Self {
        Box::into_raw(Box::new(FfiTodoResult {
            error_code,
            error_message,
            http_status,
            data_tag,
            data,
        }))
    }

    fn error(error_code: FfiErrorCode, message: String, http_status: u16) -> *mut Self {
        let message = c_string(message);
        Self::boxed(error_code, message, http_status, FfiDataTag::None, std::ptr::null_mut())
    }

    fn invalid_title(todo: &Todo) -> *mut Self {
        let message = format!("todo {} title contains an interior NUL byte", todo.id);
        Self::error(FfiErrorCode::InvalidString, message, 0)
    }

    /// Build a success result carrying a single `FfiTodo`, or an
    /// `InvalidString` error if its title has an interior NUL.
    pub(crate) fn ok_todo(todo: Todo) -> *mut Self {
        if let Some(bad) = nul_title([&todo]) {
            return Self::invalid_title(bad);
        }
        let data = Box::into_raw(Box::new(FfiTodo::from_core(todo))) as *mut c_void;
        Self::boxed(FfiErrorCode::Ok, std::ptr::null_mut(), 0, FfiDataTag::Todo, data)
    }

    /// Build a success result carrying a `FfiTodoList`. One bad title fails
    /// the whole list.
    pub(crate) fn ok_todo_list(todos: Vec<Todo>) -> *mut Self {
        if let Some(bad) = nul_title(&todos) {
            return Self::invalid_title(bad);
        }
        let len = todos.len() as u32;
        let items = if todos.is_empty() {
            std::ptr::null_mut()
        } else {
            let items: Box<[FfiTodo]> = todos.into_iter().map(FfiTodo::from_core).collect();
            Box::into_raw(items) as *mut FfiTodo
        };
        let data = Box::into_raw(Box::new(FfiTodoList { items, len })) as *mut c_void;
        Self::boxed(FfiErrorCode::Ok, std::ptr::null_mut(), 0, FfiDataTag::TodoList, data)
    }

    /// Build a success result with no data payload (delete).
    pub(crate) fn ok_empty() -> *mut Self {
        Self::boxed(
            FfiErrorCode::Ok,
            std::ptr::null_mut(),
            0,
            FfiDataTag::None,
            std::ptr::null_mut(),
        )
    }

    /// Build an error result from an `ApiError`.
    pub(crate) fn from_error(err: ApiError) -> *mut Self {
        let (error_code, http_status) = match &err {
            ApiError::NotFound => (FfiErrorCode::NotFound, 404u16),
            ApiError::HttpError { status, .. } => (FfiErrorCode::Http, *status),
            ApiError::DeserializationError(_) => (FfiErrorCode::Deserialization, 0),
            ApiError::SerializationError(_) => (FfiErrorCode::Serialization, 0),
        };
        Self::error(error_code, err.to_string(), http_status)
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::error(FfiErrorCode::NullArg, format!("null argument: {name}"), 0)
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::error(FfiErrorCode::Panic, msg.to_string(), 0)
    }
}
