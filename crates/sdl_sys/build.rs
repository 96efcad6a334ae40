use std::env;

fn main() {
    println!("cargo:rustc-check-cfg=cfg(sdl_stub)");
    println!("cargo:rerun-if-env-changed=SDL2_LIB_DIR");
    println!("cargo:rerun-if-env-changed=SDL2_INCLUDE_DIR");
    println!("cargo:rerun-if-changed=csrc/abi_layout.c");

    if env::var_os("CARGO_FEATURE_NATIVE").is_none() {
        println!("cargo:rustc-cfg=sdl_stub");
        // Read by dependents as DEP_SDL2_STUB.
        println!("cargo:stub=1");
        return;
    }

    if let Some(dir) = env::var_os("SDL2_LIB_DIR") {
        println!("cargo:rustc-link-search=native={}", dir.to_string_lossy());
    }

    let target = env::var("TARGET").unwrap_or_default();
    if target.contains("apple-darwin") && env::var_os("SDL2_LIB_DIR").is_none() {
        println!("cargo:rustc-link-search=native=/opt/homebrew/lib");
        println!("cargo:rustc-link-search=native=/usr/local/lib");
    }

    println!("cargo:rustc-link-lib=SDL2");
    println!("cargo:rustc-link-lib=SDL2_ttf");
    println!("cargo:rustc-link-lib=SDL2_mixer");

    #[cfg(feature = "native")]
    compile_layout_table();
}

/// Builds the offset table the layout tests compare against the headers.
#[cfg(feature = "native")]
fn compile_layout_table() {
    let include = env::var_os("SDL2_INCLUDE_DIR").unwrap_or_else(|| "/usr/include/SDL2".into());
    cc::Build::new()
        .file("csrc/abi_layout.c")
        .include(include)
        .warnings(true)
        .compile("sdl_abi_layout");
}
