fn main() {
    let version = env!("CARGO_PKG_VERSION").to_string();

    println!("cargo:rustc-env=APP_VERSION={}", version);

    // The puzzle corpus is embedded with include_str!, rebuild when it changes
    println!("cargo:rerun-if-changed=resources");
}
