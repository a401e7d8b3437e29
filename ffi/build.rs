//! Generates `include/todos_ffi.h` from the `extern "C"` surface.

use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=src");

    let crate_dir =
        PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string()));
    let include_dir = crate_dir.join("include");

    let bindings = cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("TODOS_FFI_H")
        .with_cpp_compat(true)
        .generate();

    // A header that fails to generate must not break the Rust build.
    match bindings {
        Ok(bindings) => {
            if std::fs::create_dir_all(&include_dir).is_ok() {
                bindings.write_to_file(include_dir.join("todos_ffi.h"));
            }
        }
        Err(err) => println!("cargo:warning=cbindgen: {err}"),
    }
}
