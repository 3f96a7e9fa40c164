//! Raw FFI bindings to `libGammu`, the Gammu mobile phone management library.
//!
//! All types and functions mirror `gammu.h` and are generated by
//! [`bindgen`](https://docs.rs/bindgen). Do not edit manually.
//!
//! # Build
//!
//! - Feature `link`: emit linker directives for the system `libGammu`
//!   (`GAMMU_LIB_DIR` extends the search path, `GAMMU_STATIC` links statically).
//! - Feature `regenerate`: rerun `bindgen` against `$GAMMU_INCLUDE_DIR/gammu.h`.
//!
//! Without `link`, the crate still provides every struct and constant, so
//! code that marshals records without calling into the library builds and
//! tests on machines where Gammu is not installed.

// sys crate: unsafe FFI, non-idiomatic generated code
#![allow(
    unsafe_code,
    missing_docs,
    non_camel_case_types,
    non_upper_case_globals,
    non_snake_case,
    clippy::missing_safety_doc,
    clippy::upper_case_acronyms
)]

// When the `regenerate` feature is enabled, use freshly generated bindings.
// Otherwise, use the pre-generated bindings committed in the repository.
#[cfg(feature = "regenerate")]
include!(concat!(env!("OUT_DIR"), "/bindings.rs"));
#[cfg(not(feature = "regenerate"))]
include!("bindings.rs");
