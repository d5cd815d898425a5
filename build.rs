fn main() {
    // Windows main threads get 1MB of stack; sqlparser recurses deeply on
    // nested DEFAULT expressions and generated columns, so match the 8MB
    // Linux/macOS default. CARGO_CFG_TARGET_OS keeps cross builds correct.
    let target_os = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    if target_os == "windows" {
        let target_env = std::env::var("CARGO_CFG_TARGET_ENV").unwrap_or_default();

        if target_env == "msvc" {
            println!("cargo:rustc-link-arg=/STACK:8388608");
        } else {
            println!("cargo:rustc-link-arg=-Wl,--stack,8388608");
        }
    }
}
