use std::env;

fn main() {
    println!("cargo:rustc-check-cfg=cfg(sdl_stub)");

    // Set by the sdl_sys build script when it serves the stub backend.
    if env::var_os("DEP_SDL2_STUB").is_some() {
        println!("cargo:rustc-cfg=sdl_stub");
    }
}
