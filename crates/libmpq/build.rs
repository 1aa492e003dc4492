use std::path::Path;

fn main() {
    eprintln!("Searching for libmpq>=0.4.2 with pkg-config.");
    if pkg_config::Config::new().atleast_version("0.4.2").probe("libmpq").is_ok() {
        // probe() printed all the relevant cargo metadata output so we don't have to do anything
        eprintln!("libmpq found using pkg-config");
        return;
    }

    // Fallback for systems that have libmpq installed but not libmpq-dev: look for libmpq.so or
    // libmpq.a (probably a symlink) either in this crate's directory or in the workspace root, add
    // that directory as a native search path, and tell rustc to link with it. All we need is the
    // link line; nothing else pkg-config would tell us matters here, and the linker follows the
    // .so symlink to the real library with no special rpath handling.
    //
    // For custom libmpq installations, set PKG_CONFIG_PATH and use pkg-config as usual, not this
    // method.
    eprintln!("Failed to find libmpq using pkg-config, looking for a local libmpq instead.");

    let mydir = std::path::PathBuf::from(std::env::var_os("CARGO_MANIFEST_DIR").unwrap());
    if check_local_libmpq(&mydir) {
        return;
    }

    if let Some(rootdir) = mydir.parent().and_then(Path::parent) {
        if check_local_libmpq(rootdir) {
            return;
        }
    }

    // Emit a plain link line and let the final link report the missing library. This keeps the
    // rlib buildable (and mpqx-core's tests runnable) on systems without libmpq installed.
    println!(
        "cargo:warning=libmpq not found via pkg-config or a local symlink; \
         linking the mpqx binary will fail until libmpq (or libmpq-dev) is installed"
    );
    println!("cargo:rustc-link-lib=dylib=mpq");
}

fn check_local_libmpq(dir: &Path) -> bool {
    let so_file = dir.join("libmpq.so");
    if so_file.exists() {
        eprintln!("Found libmpq.so in {}", dir.display());
        println!("cargo:rustc-link-search=native={}", dir.display());
        println!("cargo:rustc-link-lib=dylib=mpq");
        return true;
    }

    let a_file = dir.join("libmpq.a");
    if a_file.exists() {
        eprintln!("Found libmpq.a in {}", dir.display());
        println!("cargo:rustc-link-search=native={}", dir.display());
        // n.b. the "static" lib type matters, or we get weird linker errors when building for musl
        println!("cargo:rustc-link-lib=static=mpq");
        return true;
    }

    false
}
