//! Build script for gammu-sys.
//!
//! 1. Configures the linker for the system `libGammu` (feature `link`).
//! 2. Optionally runs `bindgen` to regenerate Rust bindings (feature `regenerate`).
//!
//! # Environment variables
//!
//! - `GAMMU_LIB_DIR`: Directory containing `libGammu.so` / `Gammu.lib`.
//!   Added to the linker search path when set.
//!
//! - `GAMMU_INCLUDE_DIR`: Directory containing `gammu.h`. Used by the
//!   `regenerate` feature; defaults to `/usr/include/gammu`.
//!
//! - `GAMMU_STATIC`: Link `libGammu` statically instead of dynamically.
//!
//! - `GAMMU_UPDATE_BINDINGS`: When set (any value) alongside the `regenerate`
//!   feature, the freshly generated `bindings.rs` is copied back to
//!   `src/bindings.rs` so it can be committed to the repository.

use std::env;
#[cfg(feature = "regenerate")]
use std::fs;
#[cfg(feature = "regenerate")]
use std::path::{Path, PathBuf};

fn main() {
    println!("cargo:rerun-if-env-changed=GAMMU_LIB_DIR");
    println!("cargo:rerun-if-env-changed=GAMMU_INCLUDE_DIR");
    println!("cargo:rerun-if-env-changed=GAMMU_STATIC");
    println!("cargo:rerun-if-env-changed=GAMMU_UPDATE_BINDINGS");
    println!("cargo:rerun-if-env-changed=DOCS_RS");

    // docs.rs has no libGammu; the declarations still compile for docs.
    if env::var("DOCS_RS").is_ok() {
        return;
    }

    // Type mirrors only: nothing to link.
    if env::var("CARGO_FEATURE_LINK").is_err() {
        return;
    }

    let target = env::var("TARGET").unwrap_or_default();

    if let Ok(lib_dir) = env::var("GAMMU_LIB_DIR") {
        println!("cargo:warning=Using libGammu from: {lib_dir}");
        println!("cargo:rustc-link-search=native={lib_dir}");
    }

    #[cfg(feature = "regenerate")]
    {
        let include_dir = env::var("GAMMU_INCLUDE_DIR")
            .map_or_else(|_| PathBuf::from("/usr/include/gammu"), PathBuf::from);
        let header = include_dir.join("gammu.h");
        assert!(
            header.exists(),
            "gammu.h not found: {} (set GAMMU_INCLUDE_DIR)",
            header.display()
        );
        println!("cargo:rerun-if-changed={}", header.display());
        let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));
        generate_bindings(&header, &include_dir, &out_dir);
    }

    link_native_lib(&target);
}

/// Emit `cargo:rustc-link-lib` for libGammu and its runtime dependencies.
fn link_native_lib(target: &str) {
    if env::var("GAMMU_STATIC").is_ok() {
        println!("cargo:rustc-link-lib=static=Gammu");
        if target.contains("linux") {
            for lib in ["m", "pthread", "dl"] {
                println!("cargo:rustc-link-lib=dylib={lib}");
            }
        }
    } else {
        println!("cargo:rustc-link-lib=dylib=Gammu");
    }
}

/// Run `bindgen` on `gammu.h` to produce `$OUT_DIR/bindings.rs`.
///
/// Gammu's C enums are emitted as plain integer constants: values reported by
/// the library are not guaranteed to be within the declared range, which
/// would be undefined behaviour for a Rust enum.
#[cfg(feature = "regenerate")]
fn generate_bindings(header: &Path, include_dir: &Path, out_dir: &Path) {
    let bindings = bindgen::Builder::default()
        .header(header.to_str().expect("path is not valid UTF-8"))
        .clang_arg(format!("-I{}", include_dir.display()))
        .use_core()
        .allowlist_function("GSM_.*")
        .allowlist_function("INI_.*")
        .allowlist_function("GetGammuVersion")
        .allowlist_function("CheckDate|CheckTime|OSDate|OSDateTime")
        .allowlist_type("GSM_.*")
        .allowlist_type("INI_Section")
        .allowlist_var("GSM_.*|ERR_.*|VERSION.*")
        .opaque_type("GSM_StateMachine|GSM_Debug_Info|INI_Section")
        .derive_debug(true)
        .derive_eq(true)
        .prepend_enum_name(false)
        .default_enum_style(bindgen::EnumVariation::Consts)
        .parse_callbacks(Box::new(bindgen::CargoCallbacks::new()))
        .generate()
        .expect("bindgen failed to generate bindings from gammu.h");

    let out_file = out_dir.join("bindings.rs");
    bindings
        .write_to_file(&out_file)
        .expect("Failed to write bindings.rs");

    if env::var("GAMMU_UPDATE_BINDINGS").is_ok() {
        let manifest_dir =
            PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set"));
        let committed = manifest_dir.join("src").join("bindings.rs");
        fs::copy(&out_file, &committed).expect("Failed to copy bindings.rs to src/");
        println!(
            "cargo:warning=Updated committed bindings: {}",
            committed.display()
        );
    }
}
